//! Test helper utilities
//!
//! Shared in-memory store fakes and schema builders for the format
//! workflow tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use petkeep_common::models::{
    AnimalRecord, PropertyDefinition, SpeciesSchema, ValueCell, IMAGES_KEY, PET_ID_KEY,
    SPECIES_KEY,
};
use petkeep_common::{Error, Result};
use petkeep_format::store::{AnimalStore, SpeciesStore};

/// In-memory species store with a per-name fetch counter
pub struct MemorySpeciesStore {
    names: Vec<String>,
    schemas: HashMap<String, SpeciesSchema>,
    pub fetch_counts: Mutex<HashMap<String, usize>>,
}

impl MemorySpeciesStore {
    pub fn new(schemas: Vec<SpeciesSchema>) -> Self {
        let names = schemas.iter().map(|s| s.name.clone()).collect();
        let schemas = schemas.into_iter().map(|s| (s.name.clone(), s)).collect();
        Self {
            names,
            schemas,
            fetch_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Register a species name with no backing schema, so `get_schema`
    /// fails for it
    pub fn with_phantom_species(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self
    }
}

#[async_trait]
impl SpeciesStore for MemorySpeciesStore {
    async fn list_species_names(&self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }

    async fn get_schema(&self, name: &str) -> Result<SpeciesSchema> {
        *self
            .fetch_counts
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_insert(0) += 1;
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| Error::SchemaNotFound(name.to_string()))
    }
}

/// In-memory animal store that records saves and can fail on demand
pub struct MemoryAnimalStore {
    animals: Vec<AnimalRecord>,
    fail_for: HashSet<String>,
    pub saved: Mutex<Vec<(String, AnimalRecord)>>,
}

impl MemoryAnimalStore {
    pub fn new(animals: Vec<AnimalRecord>) -> Self {
        Self {
            animals,
            fail_for: HashSet::new(),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Make saves fail for the record with the given petId
    pub fn failing_for(mut self, pet_id: &str) -> Self {
        self.fail_for.insert(pet_id.to_string());
        self
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl AnimalStore for MemoryAnimalStore {
    async fn list_all(&self) -> Result<Vec<AnimalRecord>> {
        Ok(self.animals.clone())
    }

    async fn save(&self, species: &str, record: &AnimalRecord) -> Result<AnimalRecord> {
        if let Some(id) = record.pet_id().and_then(|v| v.as_str()) {
            if self.fail_for.contains(id) {
                return Err(Error::Persistence(format!("write failed for {}", id)));
            }
        }
        self.saved
            .lock()
            .unwrap()
            .push((species.to_string(), record.clone()));
        Ok(record.clone())
    }
}

/// Schema with the three forced keys plus a color option list
pub fn species_schema(name: &str, canonical_example: &str) -> SpeciesSchema {
    SpeciesSchema::new(
        name,
        vec![
            PropertyDefinition::new(SPECIES_KEY).with_example(json!(canonical_example)),
            PropertyDefinition::new(PET_ID_KEY),
            PropertyDefinition::new(IMAGES_KEY).with_default(json!([])),
            PropertyDefinition::new("color")
                .with_example(json!("brown"))
                .with_options(vec![json!("brown"), json!("white")]),
        ],
    )
}

/// Record carrying a species, a petId, and one stored image
pub fn animal(species: &str, pet_id: &str) -> AnimalRecord {
    let mut record = AnimalRecord::new();
    record.insert(SPECIES_KEY, ValueCell::of(json!(species)));
    record.insert(PET_ID_KEY, ValueCell::of(json!(pet_id)));
    record.insert(
        IMAGES_KEY,
        ValueCell::of(json!([format!("http://legacy.test/uploads/{}.png", pet_id)])),
    );
    record
}
