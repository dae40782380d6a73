use crate::error::{AppError, AppResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// 生成失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// 记录失败并跳过该段落，继续处理后续段落
    #[default]
    SkipParagraph,
    /// 第一次生成失败即终止整个文档
    AbortDocument,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "skip_paragraph" => Ok(FailurePolicy::SkipParagraph),
            "abort" | "abort_document" => Ok(FailurePolicy::AbortDocument),
            other => Err(format!("未知的失败策略: {other}")),
        }
    }
}

/// LLM 生成服务配置
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// 兼容 OpenAI 的 API 地址
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    /// 每个段落生成的问答数量（写入提示词）
    pub pairs_per_paragraph: usize,
    /// 单次调用超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.9,
            max_tokens: 200,
            top_p: 1.0,
            pairs_per_paragraph: 2,
            request_timeout_secs: 60,
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务监听地址
    pub server_addr: String,
    /// 段落的 token 预算
    pub paragraph_token_budget: usize,
    /// 同时处理的段落数量
    pub max_concurrent_paragraphs: usize,
    /// 生成失败策略
    pub failure_policy: FailurePolicy,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8000".to_string(),
            paragraph_token_budget: 50,
            max_concurrent_paragraphs: 1,
            failure_policy: FailurePolicy::SkipParagraph,
            max_upload_bytes: 20 * 1024 * 1024,
            verbose_logging: false,
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// 加载配置：可选的 TOML 文件，然后由环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(display.clone(), e))?;
        Self::from_toml_str(&content, &display)
    }

    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            }
            .into()
        })
    }

    /// 使用环境变量覆盖配置
    ///
    /// `lookup` 负责读取变量，测试中可以替换为内存表
    pub fn with_env_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PDF2QA_SERVER_ADDR") {
            self.server_addr = v;
        }
        if let Some(v) = parse_var(&lookup, "PDF2QA_TOKEN_BUDGET", "usize")? {
            self.paragraph_token_budget = v;
        }
        if let Some(v) = parse_var(&lookup, "PDF2QA_MAX_CONCURRENT", "usize")? {
            self.max_concurrent_paragraphs = v;
        }
        if let Some(v) = parse_var(&lookup, "PDF2QA_FAILURE_POLICY", "FailurePolicy")? {
            self.failure_policy = v;
        }
        if let Some(v) = parse_var(&lookup, "PDF2QA_VERBOSE", "bool")? {
            self.verbose_logging = v;
        }
        if let Some(v) = parse_var(&lookup, "PDF2QA_MAX_UPLOAD_BYTES", "usize")? {
            self.max_upload_bytes = v;
        }
        if let Some(v) = lookup("OPENAI_API_KEY") {
            self.generation.api_key = v;
        }
        if let Some(v) = lookup("OPENAI_API_BASE") {
            self.generation.endpoint = v;
        }
        if let Some(v) = lookup("OPENAI_MODEL") {
            self.generation.model = v;
        }
        if let Some(v) = parse_var(&lookup, "OPENAI_TEMPERATURE", "f32")? {
            self.generation.temperature = v;
        }
        if let Some(v) = parse_var(&lookup, "OPENAI_MAX_TOKENS", "u32")? {
            self.generation.max_tokens = v;
        }
        Ok(self)
    }

    /// 检查配置值
    pub fn validate(&self) -> AppResult<()> {
        if self.paragraph_token_budget == 0 {
            return Err(invalid("paragraph_token_budget", "必须大于 0"));
        }
        if self.max_concurrent_paragraphs == 0 {
            return Err(invalid("max_concurrent_paragraphs", "必须大于 0"));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(invalid("generation.temperature", "必须在 0.0 到 2.0 之间"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var_name: &str, expected_type: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}

fn invalid(field: &str, reason: &str) -> AppError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
