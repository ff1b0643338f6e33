//! 课表文本解析器
//!
//! 把粘贴或 OCR 得到的课表文本转换为 [`Schedule`]。
//!
//! ## 流程
//! 1. 拆分为去掉首尾空白的非空行
//! 2. 根据第一行判断文本格式（[`Grammar`]）
//! 3. 交给对应格式的解析器；表格格式一节课都没解析出来时回退到自由文本格式
//! 4. 每天的课程按开始时间排序
//!
//! 解析是纯函数：不做 I/O、没有共享状态，对任何输入都不会报错，
//! 无法识别的行直接跳过。

pub mod free_text;
pub mod ids;
pub mod patterns;
pub mod tabular;
pub mod time;

use tracing::{debug, info};

use crate::models::Schedule;
use patterns::TABULAR_HEADER_MARKER;

pub use time::{time_to_minutes, TimeRange};

/// 支持的两种文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// 制表符分隔的课程导出（第一行含 "Formal Code"）
    Tabular,
    /// 星期标题 + 每行一节课
    FreeText,
}

impl Grammar {
    /// 根据第一行判断格式
    pub fn detect(lines: &[&str]) -> Self {
        match lines.first() {
            Some(first) if first.to_lowercase().contains(TABULAR_HEADER_MARKER) => {
                Grammar::Tabular
            }
            _ => Grammar::FreeText,
        }
    }

    /// 用该格式解析；没有识别出任何课程时返回 `None`
    pub fn extract(self, lines: &[&str]) -> Option<Schedule> {
        match self {
            Grammar::Tabular => tabular::extract(lines),
            Grammar::FreeText => Some(free_text::extract(lines)),
        }
    }
}

/// 一次解析的结果
#[derive(Debug, Clone)]
pub struct ParsedRoutine {
    pub schedule: Schedule,
    /// 第一行检测出的格式
    pub detected: Grammar,
    /// 实际产出结果的格式
    pub used: Grammar,
}

impl ParsedRoutine {
    /// 是否从表格格式回退到了自由文本格式
    pub fn fell_back(&self) -> bool {
        self.detected != self.used
    }
}

/// 拆分为去掉首尾空白的非空行
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// 解析课表文本，同时返回所用的格式
pub fn parse_routine(text: &str) -> ParsedRoutine {
    let lines = split_lines(text);
    let detected = Grammar::detect(&lines);
    debug!("检测到课表格式: {:?}，共 {} 行", detected, lines.len());

    let (mut schedule, used) = match detected.extract(&lines) {
        Some(schedule) => (schedule, detected),
        None => {
            info!("表格格式未解析出课程，回退到自由文本格式");
            (free_text::extract(&lines), Grammar::FreeText)
        }
    };

    schedule.sort_sessions();

    ParsedRoutine {
        schedule,
        detected,
        used,
    }
}

/// 解析课表文本
///
/// 空输入或无法识别的输入得到空课表，不会报错。
pub fn parse_routine_text(text: &str) -> Schedule {
    parse_routine(text).schedule
}
