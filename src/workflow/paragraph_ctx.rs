//! 段落处理上下文
//!
//! 封装"我正在处理文档的第几个段落"这一信息

use std::fmt::Display;

/// 段落处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphCtx {
    /// 段落在文档中的序号（从1开始）
    pub paragraph_index: usize,

    /// 文档的段落总数（仅用于日志显示）
    pub total_paragraphs: usize,
}

impl ParagraphCtx {
    pub fn new(paragraph_index: usize, total_paragraphs: usize) -> Self {
        Self {
            paragraph_index,
            total_paragraphs,
        }
    }
}

impl Display for ParagraphCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[段落 {}/{}]", self.paragraph_index, self.total_paragraphs)
    }
}
