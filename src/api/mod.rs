//! HTTP API 模块
//!
//! 负责上传接口：接收 PDF → 调用编排层 → 返回问答记录

pub mod upload;

pub use upload::{build_response, router, serve, UploadResponse};
