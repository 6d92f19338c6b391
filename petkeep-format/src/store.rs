//! Storage collaborator traits
//!
//! The formatter consumes these seams and never implements them; the
//! backing database belongs to the persistence service.

use async_trait::async_trait;

use petkeep_common::models::{AnimalRecord, SpeciesSchema};
use petkeep_common::Result;

/// Read access to species schemas
#[async_trait]
pub trait SpeciesStore: Send + Sync {
    /// All registered species names
    async fn list_species_names(&self) -> Result<Vec<String>>;

    /// Fetch one schema; fails with
    /// [`Error::SchemaNotFound`](petkeep_common::Error::SchemaNotFound)
    /// for an unknown name
    async fn get_schema(&self, name: &str) -> Result<SpeciesSchema>;
}

/// Read/write access to animal records
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Every stored record, in one batch
    async fn list_all(&self) -> Result<Vec<AnimalRecord>>;

    /// Persist one record under its species; fails with
    /// [`Error::Persistence`](petkeep_common::Error::Persistence) on a
    /// write failure
    async fn save(&self, species: &str, record: &AnimalRecord) -> Result<AnimalRecord>;
}
