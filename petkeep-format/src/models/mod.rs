//! Model types for the format workflow

pub mod format_options;
pub mod format_session;

pub use format_options::FormatOptions;
pub use format_session::{FormatSession, FormatState, RecordFailure};
