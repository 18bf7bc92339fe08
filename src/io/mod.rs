pub mod config_io;
pub mod identity;
pub mod lock;
pub mod paths;
pub mod store;
pub mod sync;
pub mod watcher;
