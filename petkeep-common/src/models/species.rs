//! Species schema model
//!
//! A species is described by an ordered list of property definitions. The
//! order is display-significant for the admin UI but carries no semantic
//! weight during reconciliation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property key carrying the species discriminator on schemas and records
pub const SPECIES_KEY: &str = "species";

/// Property key for the record identity field
pub const PET_ID_KEY: &str = "petId";

/// Property key for the image reference list
pub const IMAGES_KEY: &str = "images";

/// One field's metadata within a species schema
///
/// Immutable once loaded for a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    /// Unique within the schema
    pub key: String,

    /// Representative value shown in admin forms. For the `species`
    /// property this doubles as the canonical species identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Value assigned when a field has nothing better to offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_val: Option<Value>,

    /// Allowed values, possibly empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
}

impl PropertyDefinition {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            example: None,
            default_val: None,
            options: None,
        }
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_default(mut self, default_val: Value) -> Self {
        self.default_val = Some(default_val);
        self
    }

    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// True when the definition carries at least one allowed value
    pub fn has_options(&self) -> bool {
        self.options.as_ref().map_or(false, |o| !o.is_empty())
    }
}

/// Ordered set of property definitions for one species
///
/// One schema exists per species name; created and updated by the species
/// management service, read-only from the formatter's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSchema {
    pub name: String,
    pub props: Vec<PropertyDefinition>,
}

impl SpeciesSchema {
    pub fn new(name: impl Into<String>, props: Vec<PropertyDefinition>) -> Self {
        Self {
            name: name.into(),
            props,
        }
    }

    /// Look up a property definition by key
    pub fn prop(&self, key: &str) -> Option<&PropertyDefinition> {
        self.props.iter().find(|p| p.key == key)
    }

    /// Canonical lowercased species identifier.
    ///
    /// The `species` property's example value is authoritative: the admin
    /// UI seeds it with the canonical spelling, and records that disagree
    /// are corrected during reconciliation. Falls back to the schema name
    /// when that property is missing or not a string.
    pub fn canonical_species_name(&self) -> String {
        self.prop(SPECIES_KEY)
            .and_then(|d| d.example.as_ref())
            .and_then(Value::as_str)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| self.name.to_lowercase())
    }
}
