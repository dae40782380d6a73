use std::future::Future;

use crate::error::GenerationError;

/// 文本生成能力
///
/// 输入一段提示词，返回生成的原始文本；任何上游失败都表现为 `GenerationError`
pub trait Generator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
