//! 表格格式（制表符分隔的课程导出）解析
//!
//! 每行要么是带正式课程代码的完整记录：
//! `正式代码 \t 课程名 \t 班级 \t 星期 \t 教室 \t 时间`，
//! 要么是沿用上一条完整记录课程信息的续行：`星期 \t 教室 \t 时间`。

use tracing::debug;

use super::ids::SessionIdGenerator;
use super::patterns::{FIELD_SEPARATOR, TABULAR_FULL_RECORD};
use super::time::TimeRange;
use crate::models::{Day, Schedule, Session, NOT_AVAILABLE};

/// 最近一条完整记录中的课程信息
#[derive(Debug, Clone)]
struct CourseIdentity {
    code: String,
    title: String,
    section: String,
}

/// 一行中识别出的上课记录
struct Record<'a> {
    day: Option<Day>,
    room: &'a str,
    time_slot: &'a str,
}

/// 逐行扫描时的状态
#[derive(Default)]
struct TabularScan {
    last_course: Option<CourseIdentity>,
    ids: SessionIdGenerator,
    schedule: Schedule,
}

impl TabularScan {
    fn step(mut self, line: &str) -> Self {
        let fields: Vec<&str> = FIELD_SEPARATOR.split(line).map(str::trim).collect();

        let record = if TABULAR_FULL_RECORD.is_match(line) && fields.len() >= 5 {
            let formal_code = fields[0];
            let code = formal_code.split('-').next().unwrap_or_default().trim();
            self.last_course = Some(CourseIdentity {
                code: code.to_string(),
                title: fields[1].to_string(),
                section: fields[2].to_string(),
            });
            Record {
                day: Day::normalize(fields[3]),
                room: fields[4],
                time_slot: fields.get(5).copied().unwrap_or_default(),
            }
        } else if fields.len() >= 3 && self.last_course.is_some() {
            Record {
                day: Day::normalize(fields[0]),
                room: fields[1],
                time_slot: fields[2],
            }
        } else {
            debug!("表格格式: 跳过无法识别的行: {}", line);
            return self;
        };

        self.emit(record);
        self
    }

    fn emit(&mut self, record: Record<'_>) {
        let Some(course) = self.last_course.as_ref() else {
            return;
        };
        let Some(day) = record.day else {
            return;
        };
        if record.room.is_empty() || !record.time_slot.contains('-') {
            return;
        }

        let range = TimeRange::parse(record.time_slot);
        if range.start_minutes == 0 || range.end_minutes == 0 {
            debug!("表格格式: 时间无法解析，跳过: {}", record.time_slot);
            return;
        }

        let title = if course.title.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            course.title.clone()
        };

        let session = Session {
            id: self
                .ids
                .next_id(day, &[course.code.as_str(), course.section.as_str()]),
            code: format!("{} - {}", course.code, course.section).to_uppercase(),
            title,
            room: record.room.to_uppercase(),
            display_time: range.display(),
            start_minutes: range.start_minutes,
            end_minutes: range.end_minutes,
        };
        self.schedule.push(day, session);
    }
}

/// 解析表格格式
///
/// 一节课都没有识别出来时返回 `None`，由调用方决定是否回退到自由文本格式。
pub fn extract(lines: &[&str]) -> Option<Schedule> {
    let scan = lines
        .iter()
        .fold(TabularScan::default(), |scan, line| scan.step(line));

    scan.schedule.has_sessions().then_some(scan.schedule)
}
