//! # Routine Parser
//!
//! 把粘贴或 OCR 识别出的课表文本解析为按星期分组、按时间排序的课表
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - `Day`、`Session`、`Schedule` 以及课表文本的加载
//!
//! ### ② 解析层（Parser）
//! - `parser/` - 纯函数解析器：格式检测、表格格式、自由文本格式、时间归一化
//! - 不做 I/O，对任何输入都不报错
//!
//! ### ③ 业务能力层（Services）
//! - `LlmService` - OCR 文本纠错能力
//! - `RoutineService` - 纠错 → 解析 → 结果判定，支持批量并发
//! - `Timetable` - 表格视图的网格布局
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{Config, OutputFormat};
pub use error::{AppError, AppResult, RoutineError};
pub use models::{Day, RoutineInput, Schedule, Session, SessionField};
pub use parser::{parse_routine, parse_routine_text, Grammar, ParsedRoutine};
pub use services::{LlmService, RoutineService, TextEnhancer, Timetable};
pub use utils::logging;
