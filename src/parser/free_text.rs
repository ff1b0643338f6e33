//! 自由文本格式解析
//!
//! 星期名单独占一行，随后每行一节课，直到下一个星期标题：
//!
//! ```text
//! SATURDAY
//! 10:00 AM - 11:30 AM CSE 205 Data Structure A-404
//! ```

use tracing::debug;

use super::ids::SessionIdGenerator;
use super::patterns::{DAY_HEADER, ROOM_CODE, SESSION_LINE, TITLE_RUN};
use super::time::TimeRange;
use crate::models::{Day, Schedule, Session, NOT_AVAILABLE};

#[derive(Default)]
struct FreeTextScan {
    current_day: Option<Day>,
    ids: SessionIdGenerator,
    schedule: Schedule,
}

impl FreeTextScan {
    fn step(mut self, line: &str) -> Self {
        if let Some(header) = DAY_HEADER.find(line) {
            self.current_day = Day::normalize(header.as_str());
            if let Some(day) = self.current_day {
                self.schedule.ensure_day(day);
            }
            return self;
        }

        let Some(day) = self.current_day else {
            return self;
        };

        match parse_session_line(line) {
            Some(parsed) => {
                let id = self.ids.next_id(day, &[parsed.code.as_str()]);
                self.schedule.push(day, parsed.into_session(id));
            }
            None => debug!("自由文本: 忽略无法识别的行: {}", line),
        }
        self
    }
}

/// 一行课程解析出的字段
#[derive(Debug)]
struct SessionLine {
    range: TimeRange,
    code: String,
    title: String,
    room: String,
}

impl SessionLine {
    fn into_session(self, id: String) -> Session {
        Session {
            id,
            display_time: self.range.display(),
            start_minutes: self.range.start_minutes,
            end_minutes: self.range.end_minutes,
            code: self.code,
            title: self.title,
            room: self.room,
        }
    }
}

fn parse_session_line(line: &str) -> Option<SessionLine> {
    let caps = SESSION_LINE.captures(line)?;

    let range = TimeRange::from_parts(caps[1].trim(), caps[2].trim());
    let code = caps[3].trim().to_uppercase();
    let rest = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
    let (title, room) = split_title_and_room(rest);

    Some(SessionLine {
        range,
        code,
        title,
        room,
    })
}

/// 从课程代码之后的文本中分出课程名和教室
///
/// 教室取最后一个教室代码；课程名去掉混进来的教室代码后，
/// 取开头不含数字和括号的一段。
fn split_title_and_room(rest: &str) -> (String, String) {
    let room = ROOM_CODE
        .find_iter(rest)
        .last()
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let without_room = ROOM_CODE.replace_all(rest, "");
    let title = TITLE_RUN
        .find(without_room.trim_start())
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    (title, room)
}

/// 解析自由文本格式
///
/// 遇到的星期标题都会出现在结果中（即使当天没有课）。
pub fn extract(lines: &[&str]) -> Schedule {
    lines
        .iter()
        .fold(FreeTextScan::default(), |scan, line| scan.step(line))
        .schedule
}
