//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! document_processor (处理一份文档: 提取 → 分句 → 切分段落)
//!     ↓
//! workflow::ParagraphFlow (处理单个段落: 生成 → 解析 → 去前缀)
//!     ↓
//! services (能力层: generate)     processing (纯函数: segment / parse)
//!     ↓
//! infrastructure (基础设施: PDF 提取、分句)
//! ```

pub mod document_processor;

pub use document_processor::DocumentProcessor;
