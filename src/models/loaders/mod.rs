pub mod text_loader;

pub use text_loader::{load_all_routine_files, load_routine_file, RoutineInput};
