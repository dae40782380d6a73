pub mod paragraph_ctx;
pub mod paragraph_flow;

pub use paragraph_ctx::ParagraphCtx;
pub use paragraph_flow::{build_qa_prompt, ParagraphFlow, ParagraphOutcome, RecordFailure};
