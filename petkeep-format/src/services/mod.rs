//! Service modules for the format workflow

pub mod batch_formatter;
pub mod image_paths;
pub mod record_reconciler;

pub use batch_formatter::{run_format, BatchFormatter};
pub use image_paths::ImagePathNormalizer;
pub use record_reconciler::RecordReconciler;
