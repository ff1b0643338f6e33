pub mod day;
pub mod loaders;
pub mod schedule;
pub mod session;

pub use day::Day;
pub use loaders::{load_all_routine_files, load_routine_file, RoutineInput};
pub use schedule::Schedule;
pub use session::{Session, SessionField, NOT_AVAILABLE};
