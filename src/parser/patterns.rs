//! 解析器用到的全部正则表达式
//!
//! 集中定义、按用途命名，便于单独针对字面样例做测试。

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Day;

/// 表格导出格式第一行中的标记
pub const TABULAR_HEADER_MARKER: &str = "formal code";

/// 时间片段，例如 `10:00 AM`、`1:00PM`、`13:00`
const TIME_FRAGMENT: &str = r"\d{1,2}:\d{2}\s*(?:AM|PM)?";

/// 课程代码片段：至少 3 个字母 + 至少 3 个数字 + 可选的非空白后缀
const COURSE_CODE_FRAGMENT: &str = r"[A-Z]{3,}\s*\d{3,}\S*";

/// 单个时间：小时、可选分钟、冒号或空白后跟 AM/PM
pub static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?[\s:]*(AM|PM)").unwrap());

/// 时间范围中的分隔符（容忍两侧空白）
pub static TIME_RANGE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").unwrap());

/// 独占一行的星期标题，例如 `SATURDAY`
pub static DAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<&str> = Day::ALL.iter().map(|d| d.name()).collect();
    Regex::new(&format!(r"(?i)^({})", names.join("|"))).unwrap()
});

/// 课程代码，例如 `CSE 205`、`MATH107`
pub static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){}", COURSE_CODE_FRAGMENT)).unwrap());

/// 教室代码，例如 `A-404`、`J-105`
pub static ROOM_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[A-Z]-\d{3,}\b").unwrap());

/// 自由文本中的一行课程
///
/// 分组：1 开始时间，2 结束时间，3 课程代码，4 代码之后的剩余文本（课程名 + 教室）
pub static SESSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)({time})\s*-\s*({time})\s+({code})(?:\s+(.*))?",
        time = TIME_FRAGMENT,
        code = COURSE_CODE_FRAGMENT,
    ))
    .unwrap()
});

/// 课程名：不含数字、方括号和圆括号的开头一段
pub static TITLE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\d\[\]()]+").unwrap());

/// 表格中的完整记录行（带正式课程代码）
///
/// 宽松的启发式：`字母+数字` 紧跟短横线，后面再出现一个全大写单词。
pub static TABULAR_FULL_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z]{3,}\s*\d{1,3}[A-Z]?)-.*\s+.*\s+[A-Z]{3,}").unwrap()
});

/// 表格字段分隔符（连续的制表符）
pub static FIELD_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_header() {
        assert!(DAY_HEADER.is_match("SATURDAY"));
        assert!(DAY_HEADER.is_match("thursday schedule"));
        assert!(!DAY_HEADER.is_match("M0NDAY"));
        assert!(!DAY_HEADER.is_match("Friday"));
        assert!(!DAY_HEADER.is_match("10:00 AM Sunday"));
    }

    #[test]
    fn test_course_code() {
        assert_eq!(COURSE_CODE.find("CSE 205").unwrap().as_str(), "CSE 205");
        assert_eq!(COURSE_CODE.find("math107 x").unwrap().as_str(), "math107");
        assert_eq!(COURSE_CODE.find("EEE101L").unwrap().as_str(), "EEE101L");
        assert!(COURSE_CODE.find("CS 20").is_none());
    }

    #[test]
    fn test_room_code() {
        assert_eq!(ROOM_CODE.find("Lab A-503").unwrap().as_str(), "A-503");
        assert_eq!(ROOM_CODE.find("room j-105").unwrap().as_str(), "j-105");
        assert!(ROOM_CODE.find("AB-404").is_none());
        assert!(ROOM_CODE.find("A-40").is_none());
    }

    #[test]
    fn test_session_line_groups() {
        let caps = SESSION_LINE
            .captures("10:00 AM - 11:30 AM CSE 205 Data Structure A-404")
            .unwrap();
        assert_eq!(caps[1].trim(), "10:00 AM");
        assert_eq!(caps[2].trim(), "11:30 AM");
        assert_eq!(&caps[3], "CSE 205");
        assert_eq!(&caps[4], "Data Structure A-404");

        let caps = SESSION_LINE.captures("11:30 AM- 01:00 PM CSE 206").unwrap();
        assert_eq!(&caps[3], "CSE 206");
        assert!(caps.get(4).is_none());

        assert!(SESSION_LINE.captures("Class Routine - Spring").is_none());
    }

    #[test]
    fn test_tabular_full_record() {
        assert!(TABULAR_FULL_RECORD
            .is_match("CSE205-A\tData Structure\tA\tSaturday\tAB4-404\t10:00 AM - 11:30 AM"));
        assert!(!TABULAR_FULL_RECORD.is_match("Monday\tAB4-404\t01:30 PM - 03:00 PM"));
        assert!(!TABULAR_FULL_RECORD.is_match("Formal Code\tTitle\tSection\tDay\tRoom\tTime"));
    }

    #[test]
    fn test_field_separator() {
        let fields: Vec<&str> = FIELD_SEPARATOR.split("a\t\tb\tc").collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }
}
