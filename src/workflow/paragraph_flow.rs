//! 段落处理流程 - 流程层
//!
//! 核心职责：定义"一个段落"的完整处理流程
//!
//! 流程顺序：
//! 1. 构建提示词
//! 2. 调用生成服务（带超时）
//! 3. 解析问答对
//! 4. 逐条去除前缀，每条记录单独得到一个 `Result`

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, GenerationError, ParseError, PrefixStripError};
use crate::models::{QaPair, QaRecord};
use crate::processing::{clean_pair, parse_response};
use crate::services::Generator;
use crate::utils::logging::truncate_text;
use crate::workflow::paragraph_ctx::ParagraphCtx;

/// 无法整理成记录的问答对
#[derive(Debug)]
pub struct RecordFailure {
    pub pair: QaPair,
    pub error: PrefixStripError,
}

/// 单个段落的处理结果
#[derive(Debug)]
pub struct ParagraphOutcome {
    /// 实际送入生成服务的段落文本
    pub paragraph: String,
    pub records: Vec<Result<QaRecord, RecordFailure>>,
}

impl ParagraphOutcome {
    pub fn record_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_ok()).count()
    }
}

/// 构建问答生成提示词
pub fn build_qa_prompt(paragraph: &str, pairs_per_paragraph: usize) -> String {
    format!(
        "Generate {} descriptive questions and answers per paragraph wise: {}",
        pairs_per_paragraph, paragraph
    )
}

/// 段落处理流程
///
/// - 编排 generate → parse → clean
/// - 只处理单个段落，不关心文档和并发
/// - 生成失败和解析失败向上返回，由编排层按策略处理
pub struct ParagraphFlow<G> {
    generator: G,
    pairs_per_paragraph: usize,
    request_timeout: Duration,
    verbose_logging: bool,
}

impl<G: Generator> ParagraphFlow<G> {
    pub fn new(generator: G, config: &Config) -> Self {
        Self {
            generator,
            pairs_per_paragraph: config.generation.pairs_per_paragraph,
            request_timeout: Duration::from_secs(config.generation.request_timeout_secs),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self, ctx: &ParagraphCtx, paragraph: &str) -> AppResult<ParagraphOutcome> {
        let paragraph = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
        info!("{} 正在生成问答: {}", ctx, truncate_text(&paragraph, 80));

        let prompt = build_qa_prompt(&paragraph, self.pairs_per_paragraph);
        let response = tokio::time::timeout(self.request_timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout {
                seconds: self.request_timeout.as_secs(),
            })??;

        if self.verbose_logging {
            info!("{} 生成结果:\n{}", ctx, response);
        } else {
            debug!("{} 生成结果长度: {} 字符", ctx, response.len());
        }

        let pairs = parse_response(&response);
        if pairs.is_empty() {
            return Err(ParseError::NoQuestions {
                paragraph_index: ctx.paragraph_index,
            }
            .into());
        }
        debug!("{} 解析出 {} 个问答对", ctx, pairs.len());

        let records = pairs
            .into_iter()
            .map(|pair| {
                clean_pair(&paragraph, &pair).map_err(|error| {
                    warn!("{} ⚠️ 跳过问答: {}", ctx, error);
                    RecordFailure { pair, error }
                })
            })
            .collect();

        Ok(ParagraphOutcome { paragraph, records })
    }
}
