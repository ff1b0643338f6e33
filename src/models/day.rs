use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 教学周的星期枚举
///
/// 只包含六个上课日（周六到周四），周五不上课，因此没有对应的变体。
/// 变体的声明顺序就是课表中的排列顺序。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Day {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
}

/// 三字母前缀到星期的映射
static DAY_PREFIXES: phf::Map<&'static str, Day> = phf_map! {
    "sat" => Day::Saturday,
    "sun" => Day::Sunday,
    "mon" => Day::Monday,
    "tue" => Day::Tuesday,
    "wed" => Day::Wednesday,
    "thu" => Day::Thursday,
};

impl Day {
    /// 按课表顺序排列的全部星期
    pub const ALL: [Day; 6] = [
        Day::Saturday,
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
        }
    }

    /// 从任意文本解析星期（不区分大小写的前缀匹配）
    ///
    /// `"sat"`、`"SATURDAY"`、`"  Sat. "` 都会得到 `Saturday`；
    /// 无法识别（包括周五）时返回 `None`。
    pub fn normalize(token: &str) -> Option<Self> {
        let prefix: String = token
            .trim()
            .chars()
            .take(3)
            .flat_map(char::to_lowercase)
            .collect();
        DAY_PREFIXES.get(prefix.as_str()).copied()
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefixes() {
        assert_eq!(Day::normalize("sat"), Some(Day::Saturday));
        assert_eq!(Day::normalize("SUNDAY"), Some(Day::Sunday));
        assert_eq!(Day::normalize("  Mon "), Some(Day::Monday));
        assert_eq!(Day::normalize("Tue."), Some(Day::Tuesday));
        assert_eq!(Day::normalize("wednesday"), Some(Day::Wednesday));
        assert_eq!(Day::normalize("Thu"), Some(Day::Thursday));
    }

    #[test]
    fn test_normalize_rejects_friday_and_noise() {
        assert_eq!(Day::normalize("Friday"), None);
        assert_eq!(Day::normalize("fri"), None);
        assert_eq!(Day::normalize("M0NDAY"), None);
        assert_eq!(Day::normalize("sa"), None);
        assert_eq!(Day::normalize(""), None);
    }

    #[test]
    fn test_order_follows_academic_week() {
        let mut days = vec![Day::Thursday, Day::Saturday, Day::Monday];
        days.sort();
        assert_eq!(days, vec![Day::Saturday, Day::Monday, Day::Thursday]);
        assert_eq!(Day::ALL[0].to_string(), "Saturday");
    }
}
