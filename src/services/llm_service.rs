//! LLM 服务 - 业务能力层
//!
//! 只负责"调用 LLM 生成文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, 本地推理服务等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::services::generator::Generator;

/// 约束输出格式的系统消息，解析器依赖 `Q` / `A` 行首标记
pub const QA_SYSTEM_MESSAGE: &str = "You write descriptive questions and answers about a text. \
     Put every question on its own line starting with \"Q<n>:\" and every answer on its own line \
     starting with \"A<n>:\". Do not add any other text.";

/// LLM 服务
///
/// 职责：
/// - 调用兼容 OpenAI 的 Chat Completion API
/// - 只处理单个提示词
/// - 不关心段落、文档和流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &GenerationConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.endpoint);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, GenerationError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(request_build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(request_build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(request_build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            GenerationError::ApiCallFailed {
                model: self.model_name.clone(),
                message: e.to_string(),
            }
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

impl Generator for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.send_to_llm(prompt, Some(QA_SYSTEM_MESSAGE)).await
    }
}

fn request_build_failed(err: impl std::fmt::Display) -> GenerationError {
    GenerationError::RequestBuildFailed {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> LlmService {
        let config = GenerationConfig {
            api_key: "sk-test".to_string(),
            endpoint: "http://127.0.0.1:9/v1".to_string(),
            model: "test-model".to_string(),
            ..GenerationConfig::default()
        };
        LlmService::new(&config)
    }

    #[test]
    fn test_service_keeps_generation_settings() {
        let service = create_test_service();
        assert_eq!(service.model_name(), "test-model");
        assert_eq!(service.max_tokens, 200);
        assert!((service.top_p - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    #[ignore] // 需要真实的 API Key：OPENAI_API_KEY=... cargo test -- --ignored
    async fn test_live_generation() {
        let config = crate::config::Config::load(None).unwrap();
        let service = LlmService::new(&config.generation);
        let response = service
            .generate("Generate 2 descriptive questions and answers per paragraph wise: The Rust compiler checks ownership at compile time.")
            .await
            .unwrap();
        assert!(response.lines().any(|line| line.trim().starts_with('Q')));
    }
}
