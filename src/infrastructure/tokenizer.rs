//! 分句与 token 计数
//!
//! `RegexTokenizer` 是一个近似 NLTK punkt / word_tokenize 行为的轻量实现：
//! 句末标点（`.`、`!`、`?`，可跟右引号或右括号）后接空白即为句子边界，
//! 常见缩写和单字母首字母缩写（如 `J. Smith`）不会断句。

use regex::Regex;

/// 分句与 token 计数能力
pub trait SentenceTokenizer: Send + Sync {
    /// 按原文顺序切分句子，句内空白会被归一为单个空格
    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// 计算文本的 token 数（单词与独立标点各算一个）
    fn count_tokens(&self, text: &str) -> usize;
}

/// 不视为句末的缩写（小写、不含末尾的点）
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "fig", "no",
    "vol", "inc", "ltd", "co", "al",
];

pub struct RegexTokenizer {
    boundary: Regex,
    token: Regex,
}

impl RegexTokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            boundary: Regex::new(r#"[.!?]+["')\]’”]*\s+"#)?,
            token: Regex::new(r"\w+(?:['’]\w+)*|[^\w\s]")?,
        })
    }

    /// 判断边界前的最后一个词是否为缩写
    fn ends_with_abbreviation(preceding: &str) -> bool {
        let Some(word) = preceding.split_whitespace().last() else {
            return false;
        };
        let word = word
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        let mut chars = word.chars();
        let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());

        single_letter || ABBREVIATIONS.contains(&word.as_str())
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl SentenceTokenizer for RegexTokenizer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in self.boundary.find_iter(text) {
            if m.as_str().starts_with('.') && Self::ends_with_abbreviation(&text[start..m.start()]) {
                continue;
            }
            let sentence = normalize_whitespace(&text[start..m.end()]);
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = m.end();
        }

        let tail = normalize_whitespace(&text[start..]);
        if !tail.is_empty() {
            sentences.push(tail);
        }

        sentences
    }

    fn count_tokens(&self, text: &str) -> usize {
        self.token.find_iter(text).count()
    }
}
