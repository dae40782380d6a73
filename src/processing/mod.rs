//! 纯处理层
//!
//! 不做任何 I/O，不持有任何资源，只有确定性的纯函数：
//! - `segmenter` - 句子 → 受 token 预算约束的段落
//! - `qa_parser` - 生成结果 → 问答对 → 去除前缀的问答记录

pub mod qa_parser;
pub mod segmenter;

pub use qa_parser::{clean_pair, parse_pairs, parse_response, strip_prefix, try_strip_prefix};
pub use segmenter::segment;
