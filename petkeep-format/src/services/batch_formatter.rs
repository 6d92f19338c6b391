//! Batch reformat workflow
//!
//! Reconciles every stored animal against its species schema in one
//! logical pass: the species list is fetched once, each schema exactly
//! once into a run-scoped cache, then every record is reconciled and saved
//! with bounded concurrency. A schema fetch failure aborts the run before
//! any reconciliation begins; a per-record save failure is recorded and
//! the loop continues.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use petkeep_common::models::{AnimalRecord, SpeciesSchema};
use petkeep_common::Result;

use crate::models::{FormatOptions, FormatSession, FormatState, RecordFailure};
use crate::services::{ImagePathNormalizer, RecordReconciler};
use crate::store::{AnimalStore, SpeciesStore};

/// Concurrent reconcile-and-save workers per run
const DEFAULT_CONCURRENCY: usize = 4;

/// Outcome of one record's pass through the loop
enum RecordOutcome {
    Saved,
    Skipped,
    Failed(RecordFailure),
}

/// Orchestrates [`RecordReconciler`] across every species and every record
pub struct BatchFormatter {
    reconciler: RecordReconciler,
    options: FormatOptions,
    concurrency: usize,
}

impl BatchFormatter {
    pub fn new(normalizer: ImagePathNormalizer, options: FormatOptions) -> Self {
        Self {
            reconciler: RecordReconciler::new(normalizer),
            options,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Override the per-record worker bound
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the full batch workflow over the given stores.
    ///
    /// Cancellation is honored between records: in-flight reconciliations
    /// finish, no new record is picked up, and the session ends in
    /// `Cancelled` with whatever counters accumulated.
    pub async fn run(
        &self,
        species_store: &dyn SpeciesStore,
        animal_store: &dyn AnimalStore,
        cancel_token: CancellationToken,
    ) -> Result<FormatSession> {
        let mut session = FormatSession::new();
        tracing::info!(session_id = %session.session_id, "Starting batch format run");

        session.transition_to(FormatState::FetchingSpeciesList);
        let species_names = species_store.list_species_names().await?;

        session.transition_to(FormatState::CachingSchemas);
        let cache = match build_species_cache(species_store, &species_names).await {
            Ok(cache) => cache,
            Err(e) => {
                tracing::error!(
                    session_id = %session.session_id,
                    error = %e,
                    "Schema fetch failed, aborting run"
                );
                session.transition_to(FormatState::Aborted);
                return Err(e);
            }
        };

        session.transition_to(FormatState::FetchingAnimals);
        let animals = animal_store.list_all().await?;
        let total = animals.len();

        session.transition_to(FormatState::Formatting);
        let cache = &cache;
        let outcomes: Vec<RecordOutcome> = stream::iter(animals)
            .map(|record| {
                let cancel_token = cancel_token.clone();
                async move {
                    if cancel_token.is_cancelled() {
                        return None;
                    }
                    Some(self.format_one(animal_store, cache, record).await)
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                RecordOutcome::Saved => session.succeeded += 1,
                RecordOutcome::Skipped => session.skipped += 1,
                RecordOutcome::Failed(failure) => session.failures.push(failure),
            }
        }

        if cancel_token.is_cancelled() {
            session.transition_to(FormatState::Cancelled);
            tracing::info!(
                session_id = %session.session_id,
                succeeded = session.succeeded,
                "Batch format run cancelled"
            );
            return Ok(session);
        }

        session.transition_to(FormatState::Completed);
        tracing::info!(
            session_id = %session.session_id,
            total,
            succeeded = session.succeeded,
            skipped = session.skipped,
            failed = session.failures.len(),
            "Batch format run completed"
        );
        Ok(session)
    }

    /// Reconcile and persist one record; a record referencing an unknown
    /// species is left untouched
    async fn format_one(
        &self,
        animal_store: &dyn AnimalStore,
        cache: &HashMap<String, Arc<SpeciesSchema>>,
        record: AnimalRecord,
    ) -> RecordOutcome {
        let schema = match record.species_name().and_then(|name| cache.get(name)) {
            Some(schema) => schema,
            None => {
                tracing::debug!(
                    species = ?record.species_name(),
                    "No cached schema for record, skipping"
                );
                return RecordOutcome::Skipped;
            }
        };

        let reconciled = self.reconciler.reconcile(schema, &record, &self.options);
        let species = reconciled
            .species_name()
            .map(str::to_string)
            .unwrap_or_else(|| schema.canonical_species_name());

        match animal_store.save(&species, &reconciled).await {
            Ok(_) => RecordOutcome::Saved,
            Err(e) => {
                let record_id = record_label(&reconciled);
                tracing::warn!(
                    record_id = %record_id,
                    error = %e,
                    "Record save failed, continuing"
                );
                RecordOutcome::Failed(RecordFailure {
                    record_id,
                    error: e.to_string(),
                })
            }
        }
    }
}

/// Fetch each schema exactly once; any failure is fatal to the run
async fn build_species_cache(
    species_store: &dyn SpeciesStore,
    species_names: &[String],
) -> Result<HashMap<String, Arc<SpeciesSchema>>> {
    let mut cache = HashMap::with_capacity(species_names.len());
    for name in species_names {
        let schema = species_store.get_schema(name).await?;
        cache.insert(name.clone(), Arc::new(schema));
    }
    tracing::debug!(species = cache.len(), "Species cache built");
    Ok(cache)
}

/// Human-readable identity for failure reporting
fn record_label(record: &AnimalRecord) -> String {
    match record.pet_id() {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unassigned".to_string(),
    }
}

/// Single entry point for the thin HTTP/CLI layer: build a formatter with
/// the given options and run it over the stores
pub async fn run_format(
    species_store: &dyn SpeciesStore,
    animal_store: &dyn AnimalStore,
    normalizer: ImagePathNormalizer,
    options: FormatOptions,
) -> Result<FormatSession> {
    BatchFormatter::new(normalizer, options)
        .run(species_store, animal_store, CancellationToken::new())
        .await
}
