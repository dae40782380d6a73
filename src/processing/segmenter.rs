//! 段落切分
//!
//! 把有序的句子序列合并为段落，每个段落的大小受 token 预算约束。
//!
//! 预算检查发生在加入新句子 **之前**：只要当前累积的段落还没有达到预算，
//! 下一个句子就会被整句加入。因此段落最多会超出预算一个句子，
//! 单个超长句子会独立成为一个段落。句子永远不会被拆开。

/// 将句子切分为段落
///
/// # 参数
/// - `sentences`: 按原文顺序排列的句子
/// - `budget`: 段落的 token 预算
/// - `count_tokens`: token 计数函数，通常来自 `SentenceTokenizer::count_tokens`
///
/// # 返回
/// 按原文顺序排列的段落，句子之间用单个空格连接。空白句子会被丢弃，
/// 所以不会产生空段落。
pub fn segment<S, F>(sentences: &[S], budget: usize, count_tokens: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> usize,
{
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    // 单空格连接不会改变 token 数，所以累计值可以直接相加
    let mut current_size = 0usize;

    for sentence in sentences {
        let sentence = sentence.as_ref().trim();
        if sentence.is_empty() {
            continue;
        }
        let size = count_tokens(sentence);

        if current.is_empty() {
            current.push_str(sentence);
            current_size = size;
        } else if current_size < budget {
            current.push(' ');
            current.push_str(sentence);
            current_size += size;
        } else {
            paragraphs.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_size = size;
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}
