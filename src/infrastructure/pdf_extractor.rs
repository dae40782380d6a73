//! PDF 文本提取
//!
//! 直接在内存中解析上传的字节，不落盘。

use crate::error::ExtractionError;
use tracing::debug;

/// 从文档字节中提取纯文本的能力
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, data: &[u8]) -> Result<String, ExtractionError>;
}

/// 基于 `pdf-extract` 的 PDF 提取器
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

/// PDF 文件头标记，允许出现在前 1024 字节内
const PDF_MAGIC: &[u8] = b"%PDF-";
const MAGIC_SEARCH_WINDOW: usize = 1024;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn has_pdf_header(data: &[u8]) -> bool {
        let window = &data[..data.len().min(MAGIC_SEARCH_WINDOW)];
        window
            .windows(PDF_MAGIC.len())
            .any(|candidate| candidate == PDF_MAGIC)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String, ExtractionError> {
        if !Self::has_pdf_header(data) {
            return Err(ExtractionError::InvalidDocument {
                message: "缺少 %PDF- 文件头".to_string(),
            });
        }

        let text = pdf_extract::extract_text_from_mem(data).map_err(|e| {
            ExtractionError::InvalidDocument {
                message: e.to_string(),
            }
        })?;

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        debug!("PDF 文本提取完成: {} 字节 → {} 字符", data.len(), text.chars().count());
        Ok(text)
    }
}
