pub mod logs;
pub mod plugin;
pub mod tracing;

pub use logs::{daemon_line, query_line};
pub use plugin::{PluginOutput, TestPlugin};
pub use tracing::{CapturedEvent, init_test_tracing};
