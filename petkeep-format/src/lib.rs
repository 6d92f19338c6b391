//! # Petkeep Format Library
//!
//! The schema-driven record reconciliation engine for the petkeep catalog:
//! - Record reconciliation against species schemas ([`RecordReconciler`])
//! - Image reference normalization ([`ImagePathNormalizer`])
//! - The batch reformat workflow ([`BatchFormatter`] / [`run_format`])
//! - Storage collaborator traits ([`SpeciesStore`] / [`AnimalStore`])

pub mod models;
pub mod services;
pub mod store;

pub use petkeep_common::{Error, Result};

pub use models::{FormatOptions, FormatSession, FormatState, RecordFailure};
pub use services::{run_format, BatchFormatter, ImagePathNormalizer, RecordReconciler};
pub use store::{AnimalStore, SpeciesStore};
