use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(ConfigError::UnknownOutputFormat(other.to_string())),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 解析前是否先调用 LLM 纠正 OCR 文本
    pub enhance_ocr: bool,
    /// 同时处理的课表数量
    pub max_concurrent_inputs: usize,
    /// 未指定文件时读取课表的目录
    pub input_folder: String,
    /// 输出格式
    pub output_format: OutputFormat,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enhance_ocr: false,
            max_concurrent_inputs: 8,
            input_folder: "routines".to_string(),
            output_format: OutputFormat::Json,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置或无法解析的项使用默认值
    ///
    /// `OUTPUT_FORMAT` 例外：写错时返回 [`ConfigError::UnknownOutputFormat`]，
    /// 不会悄悄退回 JSON。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            enhance_ocr: std::env::var("ENHANCE_OCR").ok().and_then(|v| v.parse().ok()).unwrap_or(default.enhance_ocr),
            max_concurrent_inputs: std::env::var("MAX_CONCURRENT_INPUTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_inputs),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_format: parse_output_format(std::env::var("OUTPUT_FORMAT").ok(), default.output_format)?,
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        })
    }

    /// 从 TOML 文件读取配置，文件中缺少的项使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::File(FileError::TomlParseFailed { source, .. }) => {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: String::new(),
                source: Box::new(e),
            })
        })
    }

    /// 优先使用 `ROUTINE_CONFIG` 指向的 TOML 文件，否则读取环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var("ROUTINE_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path)),
            Err(_) => Self::from_env(),
        }
    }

    /// 是否配置了可用的 LLM
    pub fn has_llm(&self) -> bool {
        !self.llm_api_key.trim().is_empty()
    }
}

/// 解析输出格式，未设置时使用默认值
fn parse_output_format(
    raw: Option<String>,
    default: OutputFormat,
) -> Result<OutputFormat, ConfigError> {
    match raw {
        Some(value) => value.parse(),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
enhance_ocr = true
output_format = "text"
"#,
        )
        .unwrap();
        assert!(config.enhance_ocr);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.max_concurrent_inputs, 8);
        assert!(!config.has_llm());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = Config::from_toml_str("enhance_ocr = \"maybe\"");
        assert!(matches!(
            result,
            Err(AppError::File(FileError::TomlParseFailed { .. }))
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_unknown_output_format_is_config_error() {
        assert_eq!(
            parse_output_format(None, OutputFormat::Json).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            parse_output_format(Some("Text".to_string()), OutputFormat::Json).unwrap(),
            OutputFormat::Text
        );

        let err: AppError = parse_output_format(Some("xml".to_string()), OutputFormat::Json)
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::UnknownOutputFormat(ref v)) if v == "xml"
        ));
        assert!(!err.is_user_facing());
    }
}
