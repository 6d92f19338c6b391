//! Schema-driven record reconciliation
//!
//! Merges a stored animal record against its species schema: fills missing
//! fields, prunes keys the schema no longer defines, normalizes image
//! references, and optionally synthesizes values for empty fields. The
//! schema's property list drives the pass, so the output record carries
//! exactly the schema's keys (minus optional properties the record never
//! had when `create_missing_fields` is off).

use petkeep_common::models::{
    AnimalRecord, PropertyDefinition, SpeciesSchema, ValueCell, IMAGES_KEY, PET_ID_KEY,
    SPECIES_KEY,
};
use rand::Rng;
use serde_json::Value;

use super::image_paths::ImagePathNormalizer;
use crate::models::FormatOptions;

/// Reconciles animal records against species schemas
///
/// Total over any well-formed schema/record pair: every branch has a
/// defined fallback, so reconciliation itself never fails.
#[derive(Debug, Clone)]
pub struct RecordReconciler {
    normalizer: ImagePathNormalizer,
}

impl RecordReconciler {
    pub fn new(normalizer: ImagePathNormalizer) -> Self {
        Self { normalizer }
    }

    /// Produce the reconciled form of `record` under `schema`.
    ///
    /// Pure apart from the unseeded option pick when
    /// `populate_empty_fields` is set. No I/O.
    pub fn reconcile(
        &self,
        schema: &SpeciesSchema,
        record: &AnimalRecord,
        options: &FormatOptions,
    ) -> AnimalRecord {
        let species = schema.canonical_species_name();
        tracing::debug!(species = %species, fields = record.len(), "Reconciling record");

        let mut reconciled = AnimalRecord::new();
        for def in &schema.props {
            let existing = record.get(&def.key);
            let cell = match def.key.as_str() {
                PET_ID_KEY => Some(reconcile_pet_id(def, existing)),
                IMAGES_KEY => Some(self.reconcile_images(def, existing, &species)),
                SPECIES_KEY => Some(reconcile_species(def, existing, &species)),
                _ => reconcile_general(def, existing, options),
            };
            if let Some(cell) = cell {
                reconciled.insert(def.key.clone(), cell);
            }
        }
        reconciled
    }

    /// The stored value is used only when it is already a sequence;
    /// otherwise the definition default, then the example, stand in.
    /// Whatever survives is rewritten to canonical public URLs.
    fn reconcile_images(
        &self,
        def: &PropertyDefinition,
        existing: Option<&ValueCell>,
        species: &str,
    ) -> ValueCell {
        let source = existing
            .and_then(|c| c.value.as_ref())
            .filter(|v| v.is_array())
            .or(def.default_val.as_ref())
            .or(def.example.as_ref());
        let refs = image_refs(source);
        let normalized = self.normalizer.normalize(&refs, species);

        let mut cell = ValueCell::from_definition(def);
        cell.value = Some(Value::Array(
            normalized.into_iter().map(Value::String).collect(),
        ));
        cell
    }
}

/// The identity value is preserved verbatim when set and otherwise pinned
/// to JSON null; it is never synthesized or defaulted to the example
fn reconcile_pet_id(def: &PropertyDefinition, existing: Option<&ValueCell>) -> ValueCell {
    let mut cell = ValueCell::from_definition(def);
    cell.value = Some(
        existing
            .and_then(|c| c.value.clone())
            .unwrap_or(Value::Null),
    );
    cell
}

/// The schema wins over whatever species string the record carried.
/// Metadata comes from the record's existing cell when present, with the
/// definition filling anything still missing.
fn reconcile_species(
    def: &PropertyDefinition,
    existing: Option<&ValueCell>,
    species: &str,
) -> ValueCell {
    let mut cell = existing
        .cloned()
        .unwrap_or_else(|| ValueCell::from_definition(def));
    cell.value = Some(Value::String(species.to_string()));
    cell.fill_from_definition(def);
    cell
}

/// Merge policy for every other property
fn reconcile_general(
    def: &PropertyDefinition,
    existing: Option<&ValueCell>,
    options: &FormatOptions,
) -> Option<ValueCell> {
    let mut cell = match existing {
        Some(c) => {
            let mut cell = c.clone();
            cell.fill_from_definition(def);
            cell
        }
        None if options.create_missing_fields => ValueCell::from_definition(def),
        None => return None,
    };

    if options.populate_empty_fields && !cell.has_value() {
        cell.value = pick_random_option(def)
            .or_else(|| def.example.clone())
            .or_else(|| def.default_val.clone());
    }
    Some(cell)
}

/// Uniform unseeded pick from the definition's option list
fn pick_random_option(def: &PropertyDefinition) -> Option<Value> {
    let options = def.options.as_ref()?;
    if options.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..options.len());
    Some(options[index].clone())
}

/// Interpret a JSON value as a list of image references: arrays keep their
/// string elements, a bare string is a single reference, anything else is
/// empty
fn image_refs(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}
