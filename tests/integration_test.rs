use std::collections::BTreeSet;

use routine_parser::config::Config;
use routine_parser::logging;
use routine_parser::models::{Day, Schedule};
use routine_parser::parser::{parse_routine, parse_routine_text, time_to_minutes, Grammar};
use routine_parser::services::{LlmService, RoutineService, Timetable};

const OCR_ROUTINE: &str = "
      SATURDAY
      10:00 AM - 11:30 AM CSE 205 Data Structure A-404
      11:30 AM- 01:00 PM CSE 206 Data Structure Lab A-503

      SUNDAY
      10:00AM - 11:30 AM MATH 107 Complex Variable A-405

      M0NDAY
      08:30 AM - 10:00 AM CSE 315 Artificial Inteligence J-105
      01:30 PM - 03:00 PM CSE 317 System Analysis A-401

      TUESDAY
      10:00 AM - 11:30 AM EEE 101 Electrical Circuits A-411
      01:30 PM - 04:30 PM CSE 316 AI Lab A-503

      WEDNESAY
      11:30 AM - 01:00 PM CSE 315 Artificial Inteligence J-105
";

const TABULAR_EXPORT: &str = "Formal Code\tTitle\tSection\tDay\tRoom\tTime
CSE205-A\tData Structure\tA\tSaturday\tAB4-404\t11:30 AM - 01:00 PM
Monday\tAB4-405\t01:30 PM - 03:00 PM
CSE206-A\tData Structure Lab\tA\tSaturday\tAB4-503\t08:30 AM - 10:00 AM
Tuesday\tAB4-503\t10:00 AM - 11:30 AM";

fn tuples(schedule: &Schedule) -> BTreeSet<(Day, String, String, String, String)> {
    schedule
        .iter()
        .flat_map(|(day, sessions)| {
            sessions.iter().map(move |s| {
                (
                    day,
                    s.code.clone(),
                    s.display_time.clone(),
                    s.room.clone(),
                    s.title.clone(),
                )
            })
        })
        .collect()
}

fn assert_invariants(schedule: &Schedule) {
    let mut ids = BTreeSet::new();
    for (_, sessions) in schedule.iter() {
        for s in sessions {
            assert!(s.start_minutes <= 1439 && s.end_minutes <= 1439);
            assert!(ids.insert(s.id.clone()), "duplicate id {}", s.id);
        }
        assert!(sessions
            .windows(2)
            .all(|w| w[0].start_minutes <= w[1].start_minutes));
    }
}

#[test]
fn test_scenario_free_text_single_session() {
    let schedule = parse_routine_text("SATURDAY\n10:00 AM - 11:30 AM CSE 205 Data Structure A-404");

    assert_eq!(schedule.days().collect::<Vec<_>>(), vec![Day::Saturday]);
    let session = &schedule.get(Day::Saturday).unwrap()[0];
    assert_eq!(session.code, "CSE 205");
    assert_eq!(session.title, "Data Structure");
    assert_eq!(session.room, "A-404");
    assert_eq!(session.display_time, "10:00 AM - 11:30 AM");
    assert_eq!(session.start_minutes, 600);
    assert_eq!(session.end_minutes, 690);
}

#[test]
fn test_scenario_midnight_noon_and_malformed() {
    assert_eq!(time_to_minutes("12:00 AM"), 0);
    assert_eq!(time_to_minutes("12:00 PM"), 720);
    assert_eq!(time_to_minutes("abc"), 0);
}

#[test]
fn test_scenario_empty_input() {
    let schedule = parse_routine_text("");
    assert!(schedule.is_empty());
    assert_eq!(serde_json::to_string(&schedule).unwrap(), "{}");
}

#[test]
fn test_scenario_multi_day() {
    let schedule = parse_routine_text(
        "SATURDAY\n10:00 AM - 11:30 AM CSE 205 Data Structure A-404\nSUNDAY\n10:00AM - 11:30 AM MATH 107 Complex Variable A-405",
    );
    assert_eq!(
        schedule.days().collect::<Vec<_>>(),
        vec![Day::Saturday, Day::Sunday]
    );
    assert_eq!(schedule.get(Day::Saturday).unwrap().len(), 1);
    assert_eq!(schedule.get(Day::Sunday).unwrap().len(), 1);
}

#[test]
fn test_unparseable_times_are_kept_and_sort_first() {
    let schedule = parse_routine_text(
        "MONDAY\n08:30 AM - 10:00 AM CSE 315 AI J-105\n10:00 - 11:30 CSE 205 Data Structure A-404",
    );
    assert_invariants(&schedule);

    let monday = schedule.get(Day::Monday).unwrap();
    assert_eq!(monday.len(), 2);

    assert_eq!(monday[0].code, "CSE 205");
    assert_eq!(monday[0].display_time, "10:00 - 11:30");
    assert_eq!(monday[0].start_minutes, 0);
    assert_eq!(monday[0].end_minutes, 0);
    assert!(monday[0].is_degenerate());

    assert_eq!(monday[1].code, "CSE 315");
    assert_eq!(monday[1].start_minutes, 510);
    assert!(!monday[1].is_degenerate());
}

#[test]
fn test_ocr_routine_best_effort() {
    let schedule = parse_routine_text(OCR_ROUTINE);
    assert_invariants(&schedule);

    // M0NDAY 和 WEDNESAY 识别不了，对应的课会落到前一天
    assert_eq!(
        schedule.days().collect::<Vec<_>>(),
        vec![Day::Saturday, Day::Sunday, Day::Tuesday]
    );
    assert_eq!(schedule.get(Day::Sunday).unwrap().len(), 3);
    assert_eq!(schedule.get(Day::Tuesday).unwrap().len(), 3);
    assert_eq!(schedule.total_sessions(), 8);
}

#[test]
fn test_tabular_export() {
    let parsed = parse_routine(TABULAR_EXPORT);
    assert_eq!(parsed.used, Grammar::Tabular);
    assert_invariants(&parsed.schedule);

    let saturday = parsed.schedule.get(Day::Saturday).unwrap();
    assert_eq!(saturday.len(), 2);
    // 按开始时间排序：CSE206 在前
    assert_eq!(saturday[0].code, "CSE206 - A");
    assert_eq!(saturday[1].code, "CSE205 - A");

    assert_eq!(parsed.schedule.get(Day::Monday).unwrap()[0].code, "CSE205 - A");
    assert_eq!(
        parsed.schedule.get(Day::Tuesday).unwrap()[0].title,
        "Data Structure Lab"
    );
}

#[test]
fn test_tabular_marker_any_case_and_fallback() {
    let text = "FORMAL CODE list\nSUNDAY\n10:00AM - 11:30 AM MATH 107 Complex Variable A-405";
    let parsed = parse_routine(text);
    assert_eq!(parsed.detected, Grammar::Tabular);
    assert_eq!(parsed.used, Grammar::FreeText);
    assert_eq!(parsed.schedule.total_sessions(), 1);
}

#[test]
fn test_parse_is_deterministic() {
    for text in [OCR_ROUTINE, TABULAR_EXPORT] {
        let first = parse_routine_text(text);
        let second = parse_routine_text(text);
        assert_eq!(tuples(&first), tuples(&second));
        assert_eq!(first, second);
    }
}

#[test]
fn test_never_produces_friday() {
    let schedule = parse_routine_text(
        "FRIDAY\n10:00 AM - 11:30 AM CSE 205 Data Structure A-404\nSATURDAY\n10:00 AM - 11:30 AM CSE 205 Data Structure A-404",
    );
    let json = serde_json::to_value(&schedule).unwrap();
    assert!(json.get("Friday").is_none());
    assert_eq!(schedule.total_sessions(), 1);
}

#[test]
fn test_edit_then_layout() {
    let schedule = parse_routine_text(OCR_ROUTINE);
    let id = schedule.get(Day::Saturday).unwrap()[0].id.clone();

    let edited = schedule
        .edit_session(&id, routine_parser::SessionField::Title, "Algorithms")
        .unwrap();
    assert_eq!(edited.find_session(&id).unwrap().1.title, "Algorithms");
    assert_ne!(edited, schedule);

    let timetable = Timetable::build(&edited);
    assert_eq!(timetable.rows.len(), 3);
}

#[tokio::test]
async fn test_service_without_llm_key_reports_enhancement_failure() {
    logging::init(false);

    let config = Config {
        llm_api_key: String::new(),
        ..Config::default()
    };
    let service = RoutineService::new(LlmService::new(&config));

    let err = service.process_ocr_text(OCR_ROUTINE).await.unwrap_err();
    assert!(!err.is_user_facing());

    let schedule = service.process_text(OCR_ROUTINE).unwrap();
    assert_eq!(schedule.total_sessions(), 8);
}

#[tokio::test]
#[ignore] // 需要 LLM_API_KEY，手动运行：cargo test -- --ignored
async fn test_enhance_and_parse_live() {
    logging::init(true);

    let config = Config::from_env().expect("环境变量配置无效");
    let service = RoutineService::new(LlmService::new(&config));

    let schedule = service
        .process_ocr_text(OCR_ROUTINE)
        .await
        .expect("纠错并解析失败");

    assert!(schedule.get(Day::Monday).is_some(), "M0NDAY 应被纠正为 MONDAY");
}
