//! # PDF2QA
//!
//! 把 PDF 文档转换为基于原文的问答对
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 封装外部依赖，只暴露能力
//! - `PdfExtractor` - PDF → 纯文本
//! - `RegexTokenizer` - 分句与 token 计数
//!
//! ### ② 纯处理层（Processing）
//! - `processing/` - 确定性的纯函数，不做 I/O
//! - `segment` - 句子 → 受 token 预算约束的段落
//! - `parse_pairs` / `strip_prefix` - 生成结果 → 问答对 → 问答记录
//!
//! ### ③ 业务能力层（Services）
//! - `LlmService` - 调用兼容 OpenAI 的服务生成问答
//!
//! ### ④ 流程层（Workflow）
//! - `ParagraphFlow` - 单个段落的完整流程（generate → parse → clean）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `DocumentProcessor` - 单个文档：提取、切分、并发调度、失败策略、汇总
//!
//! ### 接口
//! - `api/` - `POST /upload-pdf`
//! - `app` - 命令行入口（serve / convert）

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod processing;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::{Config, FailurePolicy, GenerationConfig};
pub use error::{AppError, AppResult};
pub use models::{ConversionReport, QaPair, QaRecord};
pub use orchestrator::DocumentProcessor;
pub use processing::{parse_pairs, segment, strip_prefix, try_strip_prefix};
pub use services::{Generator, LlmService};
pub use workflow::{ParagraphCtx, ParagraphFlow};
