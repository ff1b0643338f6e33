//! 表格视图布局
//!
//! 把课表放进固定的半小时网格：08:30 到 16:30 共 17 列，13:00-13:30 为午休列。
//! 课程从开始时间对应的列起占 `round(时长 / 30)` 列；
//! 开始时间不在网格上、或者所在列已被前一节课占用的课程不放进网格，记录在
//! [`Timetable::unplaced`] 中，保证同一行内的单元格互不重叠。

use serde::Serialize;

use crate::models::{Day, Schedule};

/// 第一列的开始时间（08:30）
pub const FIRST_SLOT: u32 = 8 * 60 + 30;
/// 每列的分钟数
pub const SLOT_MINUTES: u32 = 30;
/// 列数（08:30 到 16:30）
pub const SLOT_COUNT: usize = 17;
/// 午休开始（13:00）
pub const BREAK_START: u32 = 13 * 60;
/// 午休结束（13:30）
pub const BREAK_END: u32 = 13 * 60 + 30;

/// 所有列的开始时间
pub fn slots() -> impl Iterator<Item = u32> {
    (0..SLOT_COUNT as u32).map(|i| FIRST_SLOT + i * SLOT_MINUTES)
}

/// 网格表头，每列一个开始时间
pub fn slot_labels() -> Vec<String> {
    slots().map(format_minutes).collect()
}

fn is_break(slot: u32) -> bool {
    (BREAK_START..BREAK_END).contains(&slot)
}

/// 分钟数格式化为 `h:mm AM` 形式的表头
fn format_minutes(minutes: u32) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    let period = if h >= 12 { "PM" } else { "AM" };
    let hour = match h % 12 {
        0 => 12,
        other => other,
    };
    format!("{}:{:02} {}", hour, m, period)
}

/// 网格中的一个单元格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    /// 一节课，占 `span` 列
    Session { id: String, slot: u32, span: usize },
    /// 空列
    Empty { slot: u32, is_break: bool },
}

impl Cell {
    /// 占用的列数
    pub fn span(&self) -> usize {
        match self {
            Cell::Session { span, .. } => *span,
            Cell::Empty { .. } => 1,
        }
    }
}

/// 某天的一行
#[derive(Debug, Clone, Serialize)]
pub struct TimetableRow {
    pub day: Day,
    pub cells: Vec<Cell>,
}

/// 没能放进网格的课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unplaced {
    pub day: Day,
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Timetable {
    /// 有课的每一天一行，按课表顺序
    pub rows: Vec<TimetableRow>,
    pub unplaced: Vec<Unplaced>,
}

impl Timetable {
    pub fn build(schedule: &Schedule) -> Self {
        let mut timetable = Timetable::default();

        for (day, sessions) in schedule.iter() {
            if sessions.is_empty() {
                continue;
            }

            let mut placed = vec![false; sessions.len()];
            let mut cells = Vec::new();
            let mut occupied = 0usize;

            for (index, slot) in slots().enumerate() {
                if occupied > 0 {
                    occupied -= 1;
                    continue;
                }

                let found = sessions
                    .iter()
                    .enumerate()
                    .find(|(i, s)| !placed[*i] && s.start_minutes == slot);

                match found {
                    Some((i, session)) => {
                        placed[i] = true;
                        let span = ((session.duration_minutes() + SLOT_MINUTES / 2)
                            / SLOT_MINUTES)
                            .max(1) as usize;
                        let span = span.min(SLOT_COUNT - index);
                        occupied = span - 1;
                        cells.push(Cell::Session {
                            id: session.id.clone(),
                            slot,
                            span,
                        });
                    }
                    None => cells.push(Cell::Empty {
                        slot,
                        is_break: is_break(slot),
                    }),
                }
            }

            timetable.unplaced.extend(
                sessions
                    .iter()
                    .zip(&placed)
                    .filter(|(_, placed)| !**placed)
                    .map(|(s, _)| Unplaced {
                        day,
                        id: s.id.clone(),
                    }),
            );
            timetable.rows.push(TimetableRow { day, cells });
        }

        timetable
    }
}
