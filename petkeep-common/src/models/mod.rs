//! Data model shared between the petkeep catalog services

pub mod animal;
pub mod species;

pub use animal::{AnimalRecord, ValueCell};
pub use species::{PropertyDefinition, SpeciesSchema, IMAGES_KEY, PET_ID_KEY, SPECIES_KEY};
