pub mod llm_service;
pub mod routine_service;
pub mod timetable;

pub use llm_service::{LlmService, TextEnhancer};
pub use routine_service::{NoEnhancer, RoutineReport, RoutineService};
pub use timetable::{Cell, Timetable, TimetableRow, Unplaced};
