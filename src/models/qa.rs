use serde::{Deserialize, Serialize};

/// 从生成结果中解析出的原始问答对
///
/// `question` 是一整行以 `Q` 开头的文本，`answer` 是其后所有以 `A` 开头的行，
/// 每行末尾带一个换行符。两者都还带着编号前缀（如 `Q1:`、`A1.`）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// 最终输出的问答记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    /// 生成问答所用的段落
    pub paragraph: String,
    /// 去除前缀后的问题
    pub question: String,
    /// 去除前缀后的答案
    pub answer: String,
}
