pub mod task;
pub mod sprint;
pub mod plan;
pub mod config;

pub use task::*;
pub use sprint::*;
pub use plan::*;
pub use config::*;
