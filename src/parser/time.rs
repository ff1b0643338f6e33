//! 时间归一化

use super::patterns::{TIME_RANGE_SEPARATOR, TIME_TOKEN};

/// 一天中的最后一分钟
pub const LAST_MINUTE_OF_DAY: u32 = 24 * 60 - 1;

/// 把 12 小时制时间转换为距午夜的分钟数
///
/// 支持 `"11:30 AM"`、`"11:30:AM"`、`"1:00PM"`、`"11 AM"` 等写法。
/// 格式不对（包括缺少 AM/PM、小时或分钟越界）时返回 0，不会报错。
pub fn time_to_minutes(token: &str) -> u32 {
    let Some(caps) = TIME_TOKEN.captures(token) else {
        return 0;
    };

    let Ok(mut hours) = caps[1].parse::<u32>() else {
        return 0;
    };
    let minutes = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    if hours > 12 || minutes > 59 {
        return 0;
    }

    let is_pm = caps[3].eq_ignore_ascii_case("PM");
    if is_pm && hours != 12 {
        hours += 12;
    }
    if !is_pm && hours == 12 {
        hours = 0;
    }

    hours * 60 + minutes
}

/// 解析后的时间范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    /// 原始开始时间文本
    pub start: String,
    /// 原始结束时间文本
    pub end: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl TimeRange {
    /// 按短横线拆分时间范围，分别归一化
    ///
    /// 缺少结束部分时结束文本为空、分钟数为 0。
    pub fn parse(slot: &str) -> Self {
        let mut parts = TIME_RANGE_SEPARATOR.split(slot.trim());
        let start = parts.next().unwrap_or_default().trim().to_string();
        let end = parts.next().unwrap_or_default().trim().to_string();
        Self::from_parts(start, end)
    }

    /// 由已经拆好的开始、结束文本构造
    pub fn from_parts(start: impl Into<String>, end: impl Into<String>) -> Self {
        let start = start.into();
        let end = end.into();
        Self {
            start_minutes: time_to_minutes(&start),
            end_minutes: time_to_minutes(&end),
            start,
            end,
        }
    }

    /// 显示文本 `"<开始> - <结束>"`
    pub fn display(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}
