use serde::{Deserialize, Serialize};

/// 缺省值占位符（课程名或教室无法识别时使用）
pub const NOT_AVAILABLE: &str = "N/A";

/// 一次上课安排
///
/// 表示某门课在某一天的一次课，时间范围同时保存原始文本和分钟数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// 在一次解析结果内唯一的标识（用于编辑定位）
    pub id: String,
    /// 课程代码，大写
    pub code: String,
    /// 课程名称，无法识别时为 "N/A"
    pub title: String,
    /// 教室，大写，无法识别时为 "N/A"
    pub room: String,
    /// 显示用的时间范围，格式 "<开始> - <结束>"
    pub display_time: String,
    /// 开始时间（距午夜的分钟数）
    pub start_minutes: u32,
    /// 结束时间（距午夜的分钟数）
    pub end_minutes: u32,
}

impl Session {
    /// 课程时长（分钟），结束早于开始时为 0
    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    /// 时间是否无法解析（开始和结束都落在午夜）
    pub fn is_degenerate(&self) -> bool {
        self.start_minutes == 0 && self.end_minutes == 0
    }
}

/// 可以被编辑的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionField {
    Code,
    Title,
    Room,
}

impl SessionField {
    /// 修改会话中对应的字段
    pub(crate) fn apply(self, session: &mut Session, value: String) {
        match self {
            SessionField::Code => session.code = value,
            SessionField::Title => session.title = value,
            SessionField::Room => session.room = value,
        }
    }
}
