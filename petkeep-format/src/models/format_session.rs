//! Batch format workflow state machine
//!
//! A format run progresses through:
//! IDLE → FETCHING_SPECIES_LIST → CACHING_SCHEMAS → FETCHING_ANIMALS →
//! FORMATTING → COMPLETED
//!
//! A schema fetch failure ends the run in ABORTED before any record is
//! touched; a caller abort honored between records ends it in CANCELLED.
//! Per-record save failures never leave FORMATTING; they are collected on
//! the session and surfaced when the run completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatState {
    /// Run created, nothing fetched yet
    Idle,
    /// Pulling the full species name list
    FetchingSpeciesList,
    /// Fetching one schema per species into the run cache
    CachingSchemas,
    /// Pulling the full animal list
    FetchingAnimals,
    /// Per-record reconcile-and-save loop
    Formatting,
    /// Every record skipped or saved
    Completed,
    /// Schema fetch failed before any reconciliation
    Aborted,
    /// Caller abort honored between records
    Cancelled,
}

impl FormatState {
    /// Terminal states end the run and stamp `ended_at`
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FormatState::Completed | FormatState::Aborted | FormatState::Cancelled
        )
    }
}

/// One record that failed to persist during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFailure {
    /// Identity value of the failing record, or `"unassigned"` when the
    /// record carries none
    pub record_id: String,
    pub error: String,
}

/// Batch format run state and summary
///
/// The session is the value the thin HTTP/CLI layer relays to callers:
/// counters plus the collected per-record failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatSession {
    /// Unique run identifier
    pub session_id: Uuid,

    /// Current workflow state
    pub state: FormatState,

    /// Records reconciled and saved without error
    pub succeeded: usize,

    /// Records left untouched because no cached schema matched
    pub skipped: usize,

    /// Per-record save failures; these never abort the run
    pub failures: Vec<RecordFailure>,

    /// Run start time
    pub started_at: DateTime<Utc>,

    /// Run end time, set on the first terminal transition
    pub ended_at: Option<DateTime<Utc>>,
}

impl FormatSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: FormatState::Idle,
            succeeded: 0,
            skipped: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Transition to a new state, logging the edge
    pub fn transition_to(&mut self, new_state: FormatState) {
        tracing::debug!(
            session_id = %self.session_id,
            old_state = ?self.state,
            new_state = ?new_state,
            "Format state transition"
        );
        self.state = new_state;
        if new_state.is_terminal() && self.ended_at.is_none() {
            self.ended_at = Some(Utc::now());
        }
    }

    /// True when every record was skipped or saved without error
    pub fn is_success(&self) -> bool {
        self.state == FormatState::Completed && self.failures.is_empty()
    }
}

impl Default for FormatSession {
    fn default() -> Self {
        Self::new()
    }
}
