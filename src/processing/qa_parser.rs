//! 生成结果解析
//!
//! LLM 返回的是半自由格式的文本，问题行以 `Q` 开头，答案行以 `A` 开头，
//! 前面通常还带着 `Q1:`、`A2.`、`Q-` 之类的编号前缀。
//! 本模块负责把这些行还原成问答对，再去掉编号前缀。

use crate::error::PrefixStripError;
use crate::models::{QaPair, QaRecord};

/// 编号前缀与正文之间可能出现的分隔符
const DELIMITERS: [char; 3] = ['.', '-', ':'];

/// 把生成结果的各行解析为问答对
///
/// - 以 `Q` 开头的行开始一个新的问答对（前一个问答对随之结束）
/// - 以 `A` 开头的行追加到当前答案，每行后加换行符
/// - 其他行忽略
///
/// 第一个问题行之前的答案行会被丢弃；没有问题行时返回空列表。
/// 连续两个问题行时，前一个问题的答案为空字符串。
pub fn parse_pairs<I, S>(lines: I) -> Vec<QaPair>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pairs = Vec::new();
    let mut current_question = String::new();
    let mut current_answer = String::new();

    for line in lines {
        let line = line.as_ref().trim();

        if line.starts_with('Q') {
            if !current_question.is_empty() {
                pairs.push(QaPair::new(
                    std::mem::take(&mut current_question),
                    std::mem::take(&mut current_answer),
                ));
            }
            current_question = line.to_string();
            current_answer.clear();
        } else if line.starts_with('A') {
            current_answer.push_str(line);
            current_answer.push('\n');
        }
    }

    if !current_question.is_empty() {
        pairs.push(QaPair::new(current_question, current_answer));
    }

    pairs
}

/// 解析一整段生成结果
pub fn parse_response(response: &str) -> Vec<QaPair> {
    parse_pairs(response.lines())
}

/// 去除编号前缀（严格模式）
///
/// 取 `.`、`-`、`:` 中最先出现的一个，返回它之后的文本（去掉首尾空白）。
/// 文本中没有任何分隔符时返回 `PrefixStripError::NoDelimiter`。
pub fn try_strip_prefix(text: &str) -> Result<String, PrefixStripError> {
    match text.find(DELIMITERS) {
        // 分隔符都是单字节 ASCII，index + 1 一定落在字符边界上
        Some(index) => Ok(text[index + 1..].trim().to_string()),
        None => Err(PrefixStripError::NoDelimiter {
            text: text.to_string(),
        }),
    }
}

/// 去除编号前缀
///
/// 与 `try_strip_prefix` 相同，但没有分隔符时原样返回去掉首尾空白的文本，
/// 因此对已经没有分隔符的文本重复调用不会再改变结果。
pub fn strip_prefix(text: &str) -> String {
    try_strip_prefix(text).unwrap_or_else(|_| text.trim().to_string())
}

/// 把问答对整理成最终记录
///
/// 问题或答案任意一个无法去除前缀时返回错误，由调用方决定跳过并记录
pub fn clean_pair(paragraph: &str, pair: &QaPair) -> Result<QaRecord, PrefixStripError> {
    Ok(QaRecord {
        paragraph: paragraph.trim().to_string(),
        question: try_strip_prefix(&pair.question)?,
        answer: try_strip_prefix(&pair.answer)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_basic() {
        let lines = ["Q1 first?", "A1 first.", "Q2 second?", "A2 second."];
        let pairs = parse_pairs(lines);

        assert_eq!(
            pairs,
            vec![
                QaPair::new("Q1 first?", "A1 first.\n"),
                QaPair::new("Q2 second?", "A2 second.\n"),
            ]
        );
    }

    #[test]
    fn test_parse_pairs_orphan_answer() {
        assert!(parse_pairs(["A1 orphan answer."]).is_empty());
    }

    #[test]
    fn test_parse_pairs_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(parse_pairs(lines).is_empty());
    }

    #[test]
    fn test_leading_answers_discarded() {
        let pairs = parse_pairs(["A0 stray.", "Q1: real?", "A1: yes."]);
        assert_eq!(pairs, vec![QaPair::new("Q1: real?", "A1: yes.\n")]);
    }

    #[test]
    fn test_consecutive_questions_give_empty_answer() {
        let pairs = parse_pairs(["Q1: one?", "Q2: two?", "A2: two."]);
        assert_eq!(
            pairs,
            vec![
                QaPair::new("Q1: one?", ""),
                QaPair::new("Q2: two?", "A2: two.\n"),
            ]
        );
    }

    #[test]
    fn test_multiline_answer_and_noise() {
        let response = "\n\n  Q1: What is Rust?\n   A1: A systems language.\nsome noise line\nA: It is memory safe.\n---\n";
        let pairs = parse_response(response);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].question, "Q1: What is Rust?");
        assert_eq!(
            pairs[0].answer,
            "A1: A systems language.\nA: It is memory safe.\n"
        );
    }

    #[test]
    fn test_lowercase_markers_are_ignored() {
        assert!(parse_response("q1: lower?\na1: lower.").is_empty());
    }

    #[test]
    fn test_strip_prefix_examples() {
        assert_eq!(strip_prefix("Q1: What is the capital?"), "What is the capital?");
        assert_eq!(strip_prefix("A1. Paris is the capital."), "Paris is the capital.");
        assert_eq!(strip_prefix("Q - dashed"), "dashed");
    }

    #[test]
    fn test_strip_prefix_uses_earliest_delimiter() {
        // ':' 出现在 '.' 之前
        assert_eq!(strip_prefix("Q1: e.g. an example"), "e.g. an example");
        // '-' 出现在 ':' 之前
        assert_eq!(strip_prefix("Q-1: text"), "1: text");
    }

    #[test]
    fn test_strip_prefix_no_delimiter_is_noop() {
        assert_eq!(strip_prefix("  Question without label  "), "Question without label");
    }

    #[test]
    fn test_strip_prefix_converges() {
        let once = strip_prefix("Q1: What is the capital?");
        let twice = strip_prefix(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_try_strip_prefix_no_delimiter_errors() {
        let err = try_strip_prefix("Q1 what").unwrap_err();
        assert!(matches!(err, PrefixStripError::NoDelimiter { text } if text == "Q1 what"));
    }

    #[test]
    fn test_try_strip_prefix_empty_answer_errors() {
        assert!(try_strip_prefix("").is_err());
    }

    #[test]
    fn test_clean_pair() {
        let pair = QaPair::new("Q1: What is the capital?", "A1. Paris is the capital.\n");
        let record = clean_pair("  France is a country.  ", &pair).unwrap();

        assert_eq!(record.paragraph, "France is a country.");
        assert_eq!(record.question, "What is the capital?");
        assert_eq!(record.answer, "Paris is the capital.");
    }

    #[test]
    fn test_clean_pair_rejects_empty_answer() {
        let pair = QaPair::new("Q1: Unanswered?", "");
        assert!(clean_pair("paragraph", &pair).is_err());
    }
}
