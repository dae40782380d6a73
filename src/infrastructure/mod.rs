//! 基础设施层（Infrastructure）
//!
//! 封装外部依赖，只暴露能力：
//! - `TextExtractor` - PDF → 纯文本（`pdf-extract`）
//! - `SentenceTokenizer` - 分句与 token 计数（`regex`）

pub mod pdf_extractor;
pub mod tokenizer;

pub use pdf_extractor::{PdfExtractor, TextExtractor};
pub use tokenizer::{RegexTokenizer, SentenceTokenizer};
