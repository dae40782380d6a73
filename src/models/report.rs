use serde::{Deserialize, Serialize};

use crate::models::QaRecord;

/// 被跳过的问答记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// 段落序号（从1开始）
    pub paragraph_index: usize,
    /// 原始问题行
    pub question: String,
    pub reason: String,
}

/// 没有产出任何问答的段落
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphFailure {
    /// 段落序号（从1开始）
    pub paragraph_index: usize,
    pub kind: FailureKind,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 调用生成服务失败
    Generation,
    /// 生成结果中没有问答
    Parse,
}

/// 单个文档的转换结果
///
/// 失败以数据的形式保留下来，由调用方决定如何展示
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub paragraph_count: usize,
    pub records: Vec<QaRecord>,
    pub skipped_records: Vec<SkippedRecord>,
    pub failed_paragraphs: Vec<ParagraphFailure>,
}

impl ConversionReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
