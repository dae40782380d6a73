use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::ConversionReport;
use crate::orchestrator::DocumentProcessor;
use crate::services::LlmService;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    processor: Arc<DocumentProcessor<LlmService>>,
}

/// `convert` 命令写出的结果文件
#[derive(Debug, Serialize)]
struct ConversionOutput<'a> {
    source: String,
    generated_at: String,
    model: &'a str,
    #[serde(flatten)]
    report: &'a ConversionReport,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        if config.generation.api_key.is_empty() {
            tracing::warn!("⚠️ 未设置 OPENAI_API_KEY，生成请求可能会被拒绝");
        }
        let processor = Arc::new(DocumentProcessor::from_config(&config)?);
        Ok(Self { config, processor })
    }

    /// 以 HTTP 服务方式运行
    pub async fn serve(&self) -> AppResult<()> {
        logging::log_startup("serve", &self.config);
        api::serve(
            &self.config.server_addr,
            Arc::clone(&self.processor),
            self.config.max_upload_bytes,
        )
        .await
    }

    /// 转换单个 PDF 文件，结果写入 JSON 文件
    ///
    /// # 返回
    /// 返回结果文件路径
    pub async fn convert(&self, input: &Path, output: Option<PathBuf>) -> AppResult<PathBuf> {
        logging::log_startup("convert", &self.config);

        let data = tokio::fs::read(input)
            .await
            .map_err(|e| AppError::file_read_failed(input.display().to_string(), e))?;
        info!("📁 正在处理: {}", input.display());

        let report = self.processor.process_pdf(data).await?;

        let output = output.unwrap_or_else(|| default_output_path(input));
        let content = serde_json::to_string_pretty(&ConversionOutput {
            source: input.display().to_string(),
            generated_at: chrono::Local::now().to_rfc3339(),
            model: &self.config.generation.model,
            report: &report,
        })
        .map_err(|e| AppError::Other(format!("结果序列化失败: {e}")))?;

        tokio::fs::write(&output, content)
            .await
            .map_err(|e| AppError::file_write_failed(output.display().to_string(), e))?;

        if report.is_empty() {
            info!("没有找到问答");
        }
        info!("\n结果已保存至: {}", output.display());
        Ok(output)
    }
}

/// `report.pdf` → `report.qa.json`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("qa.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("docs/report.pdf")),
            PathBuf::from("docs/report.qa.json")
        );
        assert_eq!(
            default_output_path(Path::new("notes")),
            PathBuf::from("notes.qa.json")
        );
    }

    #[tokio::test]
    async fn test_convert_missing_file() {
        let app = App::initialize(Config::default()).unwrap();
        let err = app
            .convert(Path::new("/definitely/not/here.pdf"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }
}
