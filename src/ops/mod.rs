pub mod countdown;
pub mod day;
pub mod import;
pub mod materialize;
pub mod progress;
pub mod task_ops;
