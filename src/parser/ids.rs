use crate::models::Day;

/// 单次解析内的课程 id 生成器
///
/// id 由星期、课程信息和递增序号组成，同一输入每次解析得到相同的 id，
/// 且序号保证同一次解析中不会重复。
#[derive(Debug, Default)]
pub struct SessionIdGenerator {
    next: usize,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, day: Day, parts: &[&str]) -> String {
        let seq = self.next;
        self.next += 1;

        let mut id = day.name().to_string();
        for part in parts {
            id.push('-');
            id.push_str(part);
        }
        id.push('-');
        id.push_str(&seq.to_string());
        id
    }
}
