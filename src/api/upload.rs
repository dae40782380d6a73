//! PDF 上传接口
//!
//! - `POST /upload-pdf` - multipart 上传（字段名 `file`），返回问答记录
//! - `GET /health` - 存活检查
//!
//! 上传内容只保存在内存中，请求结束即释放。

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult, HttpError};
use crate::models::{ConversionReport, QaRecord};
use crate::orchestrator::DocumentProcessor;
use crate::services::Generator;

pub const SUCCESS_MESSAGE: &str = "PDF successfully uploaded, saved, and QNA pairs extracted!";
pub const NO_PAIRS_MESSAGE: &str = "No QNA pairs found in the PDF.";

/// 上传接口的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<QaRecord>>,
}

impl UploadResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// 根据转换结果构建响应
///
/// 没有任何问答记录时只返回提示信息，不视为错误
pub fn build_response(report: ConversionReport) -> UploadResponse {
    if report.records.is_empty() {
        UploadResponse::message(NO_PAIRS_MESSAGE)
    } else {
        UploadResponse {
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(report.records),
        }
    }
}

/// 构建路由
pub fn router<G>(processor: Arc<DocumentProcessor<G>>, max_upload_bytes: usize) -> Router
where
    G: Generator + 'static,
{
    Router::new()
        .route("/upload-pdf", post(upload_pdf::<G>))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(processor)
}

/// 启动 HTTP 服务，Ctrl-C 时优雅退出
pub async fn serve<G>(
    addr: &str,
    processor: Arc<DocumentProcessor<G>>,
    max_upload_bytes: usize,
) -> AppResult<()>
where
    G: Generator + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(format!("无法监听 {addr}: {e}")))?;

    info!("🌐 服务已启动: http://{}", addr);

    axum::serve(listener, router(processor, max_upload_bytes))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("收到退出信号，正在关闭服务...");
        })
        .await
        .map_err(|e| AppError::Other(format!("服务异常退出: {e}")))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// 上传的文件
struct Upload {
    file_name: String,
    data: Vec<u8>,
}

async fn upload_pdf<G>(
    State(processor): State<Arc<DocumentProcessor<G>>>,
    multipart: Multipart,
) -> (StatusCode, Json<UploadResponse>)
where
    G: Generator + 'static,
{
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            warn!("⚠️ 上传请求无效: {}", e);
            return (StatusCode::BAD_REQUEST, Json(UploadResponse::message(e.to_string())));
        }
    };

    info!(
        "📥 收到上传文件: {} ({} 字节)",
        upload.file_name,
        upload.data.len()
    );

    let response = match processor.process_pdf(upload.data).await {
        Ok(report) => {
            if report.is_empty() {
                info!("{}: 没有找到问答", upload.file_name);
            }
            build_response(report)
        }
        Err(e) => {
            error!("❌ 处理 {} 失败: {}", upload.file_name, e);
            UploadResponse::message(e.to_string())
        }
    };

    (StatusCode::OK, Json(response))
}

/// 读取上传文件
///
/// 优先使用名为 `file` 的字段，否则使用第一个带文件名的字段
async fn read_upload(mut multipart: Multipart) -> AppResult<Upload> {
    let mut fallback = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_read_failed)? {
        let is_file_field = field.name() == Some("file");
        if !is_file_field && field.file_name().is_none() {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload.pdf".to_string());
        let data = field.bytes().await.map_err(upload_read_failed)?;
        let upload = Upload {
            file_name,
            data: data.to_vec(),
        };

        if is_file_field {
            return Ok(upload);
        }
        fallback.get_or_insert(upload);
    }

    fallback.ok_or_else(|| HttpError::MissingFile.into())
}

fn upload_read_failed(err: impl std::fmt::Display) -> AppError {
    HttpError::UploadReadFailed {
        message: err.to_string(),
    }
    .into()
}
