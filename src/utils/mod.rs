pub mod format;
pub mod logging;

pub use format::{format_confidence, format_duration, format_time};
