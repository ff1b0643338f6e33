use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::day::Day;
use super::session::{Session, SessionField};

/// 课表：星期 → 当天按开始时间排序的课程列表
///
/// 序列化为以星期名为键的普通映射，例如 `{"Saturday": [...]}`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    days: BTreeMap<Day, Vec<Session>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 确保某天存在条目（可能为空列表）
    pub fn ensure_day(&mut self, day: Day) -> &mut Vec<Session> {
        self.days.entry(day).or_default()
    }

    /// 向某天追加一节课
    pub fn push(&mut self, day: Day, session: Session) {
        self.ensure_day(day).push(session);
    }

    /// 每天的课程按开始时间稳定排序
    pub fn sort_sessions(&mut self) {
        for sessions in self.days.values_mut() {
            sessions.sort_by_key(|s| s.start_minutes);
        }
    }

    /// 获取某天的课程
    pub fn get(&self, day: Day) -> Option<&[Session]> {
        self.days.get(&day).map(Vec::as_slice)
    }

    /// 存在条目的星期（按课表顺序）
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[Session])> {
        self.days.iter().map(|(day, s)| (*day, s.as_slice()))
    }

    /// 没有任何星期条目
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// 所有星期的课程总数
    pub fn total_sessions(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// 至少有一节课
    pub fn has_sessions(&self) -> bool {
        self.days.values().any(|s| !s.is_empty())
    }

    /// 按 id 查找课程，返回所在星期和课程
    pub fn find_session(&self, id: &str) -> Option<(Day, &Session)> {
        self.iter()
            .find_map(|(day, sessions)| sessions.iter().find(|s| s.id == id).map(|s| (day, s)))
    }

    /// 编辑一节课的某个字段
    ///
    /// 返回修改后的新课表，原课表保持不变；id 不存在时返回 `None`。
    pub fn edit_session(
        &self,
        id: &str,
        field: SessionField,
        value: impl Into<String>,
    ) -> Option<Schedule> {
        let mut edited = self.clone();
        let session = edited
            .days
            .values_mut()
            .flat_map(|sessions| sessions.iter_mut())
            .find(|s| s.id == id)?;
        field.apply(session, value.into());
        Some(edited)
    }
}
