//! LLM 服务 - 业务能力层
//!
//! 只负责"纠正 OCR 文本"能力，不关心解析流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 纠正 OCR 文本的系统提示词
const ENHANCE_SYSTEM_PROMPT: &str =
    "You are an expert in correcting OCR text, especially for class routines.";

/// 文本纠错能力
///
/// 输入原始 OCR 文本，返回纠正后的文本。解析器从不依赖它的输出格式。
pub trait TextEnhancer {
    fn enhance(&self, text: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 纠正 OCR 文本
/// - 提供通用的 LLM 调用接口
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    has_api_key: bool,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            has_api_key: config.has_llm(),
        }
    }

    /// 使用的模型名称
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
    ) -> Result<String, LlmError> {
        if !self.has_api_key {
            return Err(LlmError::MissingApiKey);
        }

        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.0)
            .max_tokens(4096u32)
            .build()
            .map_err(build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            }
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content)
    }

    /// 纠正 OCR 识别出的课表文本
    pub async fn enhance_ocr_text(&self, ocr_text: &str) -> Result<String, LlmError> {
        let user_message = build_enhance_message(ocr_text);
        let corrected = self
            .send_to_llm(&user_message, Some(ENHANCE_SYSTEM_PROMPT))
            .await?;
        Ok(strip_code_fence(&corrected).to_string())
    }
}

impl TextEnhancer for LlmService {
    async fn enhance(&self, text: &str) -> Result<String, LlmError> {
        self.enhance_ocr_text(text).await
    }
}

fn build_failed(e: impl std::error::Error + Send + Sync + 'static) -> LlmError {
    LlmError::RequestBuildFailed {
        source: Box::new(e),
    }
}

/// 构建纠错用的用户消息
fn build_enhance_message(ocr_text: &str) -> String {
    format!(
        r#"Please correct the following OCR text so that it is accurate and readable.
Pay special attention to common OCR errors such as misread characters (0/O, 1/I/l, 5/S) in day names, times, course codes and room numbers.
Keep one day name per line followed by one line per class, and keep tab-separated columns intact.
Return only the corrected text.

OCR Text: {}"#,
        ocr_text
    )
}

/// 去掉模型有时会包在结果外面的 ``` 代码块
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // 跳过 ```text 这样的语言标记行
    match inner.split_once('\n') {
        Some((first, body)) if !first.trim().contains(' ') => body.trim(),
        _ => inner.trim(),
    }
}
