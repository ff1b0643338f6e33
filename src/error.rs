use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
///
/// 解析器本身从不返回错误；这里的错误只来自外围能力（LLM 纠错、文件、配置）
/// 以及调用方对解析结果的判定。
#[derive(Debug, Error)]
pub enum AppError {
    /// 课表处理错误
    #[error("课表错误: {0}")]
    Routine(#[from] RoutineError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 课表处理错误（调用方层面的判定）
#[derive(Debug, Error)]
pub enum RoutineError {
    /// 输入为空
    #[error("输入的课表文本为空")]
    EmptyInput,
    /// 文本中找不到任何课程
    #[error("未能在文本中找到任何课表信息，请检查格式")]
    NoRoutineFound,
    /// OCR 纠错失败
    #[error("OCR 文本纠错失败: {source}")]
    EnhancementFailed {
        #[source]
        source: LlmError,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 未配置 API Key
    #[error("未配置 LLM API Key")]
    MissingApiKey,
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {source}")]
    RequestBuildFailed {
        #[source]
        source: BoxError,
    },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: BoxError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxError,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: BoxError,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未知的输出格式
    #[error("未知的输出格式: {0}")]
    UnknownOutputFormat(String),
}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 是否属于"找不到课表"这类面向用户的提示，而非故障
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::Routine(RoutineError::EmptyInput | RoutineError::NoRoutineFound)
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
