use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// PDF 文本提取错误
    #[error("文本提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// LLM 生成错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 生成结果解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 前缀去除错误
    #[error("前缀去除错误: {0}")]
    PrefixStrip(#[from] PrefixStripError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// HTTP 请求错误
    #[error("请求错误: {0}")]
    Http(#[from] HttpError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// PDF 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 不是合法的 PDF 文档
    #[error("无法解析 PDF 文档: {message}")]
    InvalidDocument { message: String },
    /// 文档中没有可提取的文本（扫描件或空白文档）
    #[error("PDF 文档中没有可提取的文本")]
    EmptyDocument,
    /// 提取任务异常退出
    #[error("提取任务执行失败: {message}")]
    TaskFailed { message: String },
}

/// LLM 生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {message}")]
    RequestBuildFailed { message: String },
    /// API 调用失败（网络、配额、非法请求等）
    #[error("LLM API 调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 调用超时
    #[error("LLM 调用超时 ({seconds} 秒)")]
    Timeout { seconds: u64 },
}

/// 生成结果解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 响应中没有任何以 `Q` 开头的行
    #[error("段落 {paragraph_index} 的生成结果中没有问题行")]
    NoQuestions { paragraph_index: usize },
}

/// 前缀去除错误
#[derive(Debug, Error)]
pub enum PrefixStripError {
    /// 文本中没有任何分隔符
    #[error("文本中没有找到分隔符 ('.', '-', ':'): {text:?}")]
    NoDelimiter { text: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// HTTP 请求错误
#[derive(Debug, Error)]
pub enum HttpError {
    /// 请求中没有上传文件
    #[error("请求中没有找到上传的文件")]
    MissingFile,
    /// 读取上传内容失败
    #[error("读取上传内容失败: {message}")]
    UploadReadFailed { message: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为生成错误（失败策略只作用于生成错误）
    pub fn is_generation(&self) -> bool {
        matches!(self, AppError::Generation(_))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式编译失败: {err}"))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_error_display() {
        let err: AppError = GenerationError::Timeout { seconds: 30 }.into();
        assert_eq!(err.to_string(), "生成错误: LLM 调用超时 (30 秒)");
        assert!(err.is_generation());
    }

    #[test]
    fn test_prefix_error_is_not_generation() {
        let err: AppError = PrefixStripError::NoDelimiter {
            text: "Q1 what".to_string(),
        }
        .into();
        assert!(!err.is_generation());
    }
}
