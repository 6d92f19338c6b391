//! Animal record model
//!
//! An animal is a mapping from property key to a value cell: the stored
//! value plus the definition metadata copied in during reconciliation, so
//! downstream consumers never re-join against the schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::species::{PropertyDefinition, PET_ID_KEY, SPECIES_KEY};

/// One property on one animal: the current value merged with the owning
/// property definition's fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueCell {
    /// Current value; `None` when the field has never been assigned
    #[serde(rename = "val", skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_val: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
}

impl ValueCell {
    /// Cell holding only a value, the shape records arrive in from storage
    pub fn of(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    /// Cell carrying a definition's metadata with no value
    pub fn from_definition(def: &PropertyDefinition) -> Self {
        Self {
            value: None,
            key: Some(def.key.clone()),
            example: def.example.clone(),
            default_val: def.default_val.clone(),
            options: def.options.clone(),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Fill any metadata fields this cell lacks from the definition.
    /// Present fields win.
    pub fn fill_from_definition(&mut self, def: &PropertyDefinition) {
        if self.key.is_none() {
            self.key = Some(def.key.clone());
        }
        if self.example.is_none() {
            self.example = def.example.clone();
        }
        if self.default_val.is_none() {
            self.default_val = def.default_val.clone();
        }
        if self.options.is_none() {
            self.options = def.options.clone();
        }
    }
}

/// Mapping from property key to value cell, with the species discriminator
/// stored as the value of the `species` key
///
/// Records are read from storage, reconciled in memory, and written back;
/// reconciliation never deletes a record, only rewrites field contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalRecord {
    fields: BTreeMap<String, ValueCell>,
}

impl AnimalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ValueCell> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, cell: ValueCell) -> Option<ValueCell> {
        self.fields.insert(key.into(), cell)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValueCell)> {
        self.fields.iter()
    }

    /// The record's declared species, read from its own `species` cell
    pub fn species_name(&self) -> Option<&str> {
        self.get(SPECIES_KEY)
            .and_then(|c| c.value.as_ref())
            .and_then(Value::as_str)
    }

    /// The identity value, when one has been assigned and is not null
    pub fn pet_id(&self) -> Option<&Value> {
        self.get(PET_ID_KEY)
            .and_then(|c| c.value.as_ref())
            .filter(|v| !v.is_null())
    }
}

impl FromIterator<(String, ValueCell)> for AnimalRecord {
    fn from_iter<I: IntoIterator<Item = (String, ValueCell)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
