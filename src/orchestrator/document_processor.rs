//! 文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **文本提取**：在阻塞线程池中把 PDF 字节转换为纯文本
//! 2. **段落切分**：分句后按 token 预算合并为段落
//! 3. **并发控制**：以有限并发调度各段落的处理流程，输出顺序与段落顺序一致
//! 4. **失败策略**：生成失败时跳过段落或终止整个文档
//! 5. **结果汇总**：把每条记录的 `Result` 汇总为 `ConversionReport`

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};

use crate::config::{Config, FailurePolicy};
use crate::error::{AppError, AppResult, ExtractionError};
use crate::infrastructure::{PdfExtractor, RegexTokenizer, SentenceTokenizer, TextExtractor};
use crate::models::{ConversionReport, FailureKind, ParagraphFailure, SkippedRecord};
use crate::processing::segment;
use crate::services::{Generator, LlmService};
use crate::utils::logging;
use crate::workflow::{ParagraphCtx, ParagraphFlow, ParagraphOutcome};

/// 文档处理器
pub struct DocumentProcessor<G> {
    extractor: Arc<dyn TextExtractor>,
    tokenizer: Arc<dyn SentenceTokenizer>,
    flow: ParagraphFlow<G>,
    token_budget: usize,
    max_concurrent: usize,
    failure_policy: FailurePolicy,
}

impl DocumentProcessor<LlmService> {
    /// 使用默认组件创建处理器：pdf-extract + 正则分句 + OpenAI 兼容服务
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            Arc::new(PdfExtractor::new()),
            Arc::new(RegexTokenizer::new()?),
            LlmService::new(&config.generation),
            config,
        ))
    }
}

impl<G: Generator> DocumentProcessor<G> {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        tokenizer: Arc<dyn SentenceTokenizer>,
        generator: G,
        config: &Config,
    ) -> Self {
        Self {
            extractor,
            tokenizer,
            flow: ParagraphFlow::new(generator, config),
            token_budget: config.paragraph_token_budget,
            max_concurrent: config.max_concurrent_paragraphs.max(1),
            failure_policy: config.failure_policy,
        }
    }

    /// 处理一份 PDF 文档
    pub async fn process_pdf(&self, data: Vec<u8>) -> AppResult<ConversionReport> {
        let bytes = data.len();
        let text = self.extract_text(data).await?;
        logging::log_text_extracted(bytes, text.chars().count());
        self.process_text(&text).await
    }

    /// 处理已经提取好的纯文本
    pub async fn process_text(&self, text: &str) -> AppResult<ConversionReport> {
        let paragraphs = self.paragraphs(text);
        self.process_paragraphs(paragraphs).await
    }

    /// 分句并切分段落
    pub fn paragraphs(&self, text: &str) -> Vec<String> {
        let sentences = self.tokenizer.split_sentences(text);
        let paragraphs = segment(&sentences, self.token_budget, |s| {
            self.tokenizer.count_tokens(s)
        });
        logging::log_paragraphs_ready(sentences.len(), paragraphs.len(), self.token_budget);
        paragraphs
    }

    /// 按顺序处理所有段落
    ///
    /// 同时最多有 `max_concurrent` 个段落在等待生成服务，
    /// 结果始终按段落顺序汇总。
    pub async fn process_paragraphs(&self, paragraphs: Vec<String>) -> AppResult<ConversionReport> {
        let total = paragraphs.len();
        let mut report = ConversionReport {
            paragraph_count: total,
            ..Default::default()
        };

        let flow = &self.flow;
        let mut outcomes = stream::iter(paragraphs.into_iter().enumerate())
            .map(|(idx, paragraph)| async move {
                let ctx = ParagraphCtx::new(idx + 1, total);
                let result = flow.run(&ctx, &paragraph).await;
                (ctx, result)
            })
            .buffered(self.max_concurrent);

        while let Some((ctx, result)) = outcomes.next().await {
            match result {
                Ok(outcome) => collect_outcome(&ctx, outcome, &mut report),
                Err(AppError::Parse(e)) => {
                    warn!("{} ⚠️ 未解析出问答: {}", ctx, e);
                    report.failed_paragraphs.push(ParagraphFailure {
                        paragraph_index: ctx.paragraph_index,
                        kind: FailureKind::Parse,
                        reason: e.to_string(),
                    });
                }
                Err(e) if e.is_generation() => match self.failure_policy {
                    FailurePolicy::AbortDocument => {
                        error!("{} ❌ 生成失败，终止文档处理: {}", ctx, e);
                        return Err(e);
                    }
                    FailurePolicy::SkipParagraph => {
                        warn!("{} ⚠️ 生成失败，跳过该段落: {}", ctx, e);
                        report.failed_paragraphs.push(ParagraphFailure {
                            paragraph_index: ctx.paragraph_index,
                            kind: FailureKind::Generation,
                            reason: e.to_string(),
                        });
                    }
                },
                Err(e) => return Err(e),
            }
        }

        logging::print_final_stats(&report);
        Ok(report)
    }

    async fn extract_text(&self, data: Vec<u8>) -> Result<String, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || extractor.extract_text(&data))
            .await
            .map_err(|e| ExtractionError::TaskFailed {
                message: e.to_string(),
            })?
    }
}

fn collect_outcome(ctx: &ParagraphCtx, outcome: ParagraphOutcome, report: &mut ConversionReport) {
    info!("{} ✓ 得到 {} 条问答", ctx, outcome.record_count());
    for record in outcome.records {
        match record {
            Ok(record) => report.records.push(record),
            Err(failure) => report.skipped_records.push(SkippedRecord {
                paragraph_index: ctx.paragraph_index,
                question: failure.pair.question,
                reason: failure.error.to_string(),
            }),
        }
    }
}
