//! Triage severity model.
//!
//! Four ordered escalation levels. Severity only ever ratchets upward
//! within a session: `merge` never returns a lower level than `current`.

use serde::{Deserialize, Serialize};

/// Escalation level for a symptom or a whole session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    /// Nothing concerning found
    #[default]
    None,
    /// Worth discussing with a provider at the next opportunity
    ReferProvider,
    /// The care team should be notified today
    NotifyCareTeam,
    /// Emergency services, now
    /// (snake_case would render "call911"; the wire token has the underscore)
    #[serde(rename = "call_911")]
    Call911,
}

impl TriageLevel {
    /// Return whichever of the two levels ranks higher.
    pub fn merge(self, candidate: TriageLevel) -> TriageLevel {
        self.max(candidate)
    }

    /// Status label shown next to a completed symptom.
    pub fn status_label(self) -> &'static str {
        match self {
            TriageLevel::Call911 => "Emergency",
            TriageLevel::NotifyCareTeam => "Alert",
            TriageLevel::ReferProvider => "Consult",
            TriageLevel::None => "Checked / safe",
        }
    }

    /// True for any level above `None`.
    pub fn is_escalation(self) -> bool {
        self > TriageLevel::None
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageLevel::None => write!(f, "none"),
            TriageLevel::ReferProvider => write!(f, "refer_provider"),
            TriageLevel::NotifyCareTeam => write!(f, "notify_care_team"),
            TriageLevel::Call911 => write!(f, "call_911"),
        }
    }
}

/// Ordered set of triage justification strings.
///
/// A reason is recorded at most once per session (exact string equality),
/// first-seen order preserved. Rendered as the "Clinical Reasoning" list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasonList {
    reasons: Vec<String>,
}

impl ReasonList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason. Returns false if it was already present.
    pub fn record(&mut self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        if self.reasons.iter().any(|r| *r == reason) {
            return false;
        }
        self.reasons.push(reason);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.reasons
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn clear(&mut self) {
        self.reasons.clear();
    }
}
