//! Session summary produced on completion.

use crate::severity::TriageLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final outcome for one visited symptom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomOutcome {
    pub symptom_id: String,
    pub name: String,
    pub level: TriageLevel,
    /// Display label for the level ("Emergency", "Alert", ...)
    pub status: String,
}

/// Everything the presentation layer needs to render the wrap-up:
/// visited symptoms with statuses, the session-wide severity, the
/// clinical reasoning list and any verbatim free-text notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub symptoms: Vec<SymptomOutcome>,
    pub highest_severity: TriageLevel,
    pub reasons: Vec<String>,
    pub notes: Vec<String>,
}

impl SessionSummary {
    pub fn overall_status(&self) -> &'static str {
        self.highest_severity.status_label()
    }

    pub fn is_emergency(&self) -> bool {
        self.highest_severity == TriageLevel::Call911
    }
}
