//! 课表服务 - 流程层
//!
//! 把"（可选）OCR 纠错 → 解析 → 判定结果"串起来，
//! 并把空输入、找不到课表、纠错失败区分成不同的错误。

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::llm_service::TextEnhancer;
use crate::error::{AppResult, LlmError, RoutineError};
use crate::models::{RoutineInput, Schedule};
use crate::parser::{self, Grammar};
use crate::utils::logging::truncate_text;

/// 不做任何纠错的占位实现
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnhancer;

impl TextEnhancer for NoEnhancer {
    async fn enhance(&self, text: &str) -> Result<String, LlmError> {
        Ok(text.to_string())
    }
}

/// 单份课表的处理结果
#[derive(Debug)]
pub struct RoutineReport {
    /// 输入名称
    pub name: String,
    /// 实际产出结果的格式
    pub grammar: Grammar,
    pub schedule: Schedule,
}

/// 课表服务
pub struct RoutineService<E> {
    enhancer: Option<E>,
    max_concurrent: usize,
}

impl RoutineService<NoEnhancer> {
    /// 不做 OCR 纠错，OCR 文本按原样解析
    pub fn without_enhancer() -> Self {
        Self {
            enhancer: None,
            max_concurrent: 1,
        }
    }
}

impl<E: TextEnhancer> RoutineService<E> {
    pub fn new(enhancer: E) -> Self {
        Self {
            enhancer: Some(enhancer),
            max_concurrent: 1,
        }
    }

    /// 设置批量处理时的并发数量（至少为 1）
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// 解析粘贴的课表文本
    pub fn process_text(&self, text: &str) -> AppResult<Schedule> {
        self.parse_checked(text).map(|(schedule, _)| schedule)
    }

    /// 先纠正 OCR 文本，再解析
    pub async fn process_ocr_text(&self, raw: &str) -> AppResult<Schedule> {
        let text = self.enhance(raw).await?;
        self.process_text(&text)
    }

    /// 处理一份输入：需要时先纠错，然后解析
    pub async fn process_input(
        &self,
        input: &RoutineInput,
        enhance: bool,
    ) -> AppResult<RoutineReport> {
        info!("📄 开始处理: {}", input.name);
        let text = if enhance {
            self.enhance(&input.text).await?
        } else {
            input.text.clone()
        };
        let (schedule, grammar) = self.parse_checked(&text)?;
        Ok(RoutineReport {
            name: input.name.clone(),
            grammar,
            schedule,
        })
    }

    /// 并发处理多份输入，结果顺序与输入一致
    pub async fn process_batch(
        &self,
        inputs: &[RoutineInput],
        enhance: bool,
    ) -> Vec<AppResult<RoutineReport>> {
        let mut results: Vec<(usize, AppResult<RoutineReport>)> =
            stream::iter(inputs.iter().enumerate())
                .map(|(index, input)| async move {
                    (index, self.process_input(input, enhance).await)
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }

    async fn enhance(&self, raw: &str) -> AppResult<String> {
        let Some(enhancer) = self.enhancer.as_ref() else {
            return Ok(raw.to_string());
        };
        match enhancer.enhance(raw).await {
            Ok(text) => {
                info!("✓ OCR 文本纠错完成: {}", truncate_text(&text, 60));
                Ok(text)
            }
            Err(source) => {
                warn!("OCR 文本纠错失败: {}", source);
                Err(RoutineError::EnhancementFailed { source }.into())
            }
        }
    }

    fn parse_checked(&self, text: &str) -> AppResult<(Schedule, Grammar)> {
        if text.trim().is_empty() {
            return Err(RoutineError::EmptyInput.into());
        }

        let parsed = parser::parse_routine(text);
        if !parsed.schedule.has_sessions() {
            warn!("⚠️ 未能在文本中找到课程");
            return Err(RoutineError::NoRoutineFound.into());
        }

        info!(
            "✓ 解析完成: {} 天, {} 节课 (格式: {:?})",
            parsed.schedule.days().count(),
            parsed.schedule.total_sessions(),
            parsed.used
        );
        Ok((parsed.schedule, parsed.used))
    }
}
