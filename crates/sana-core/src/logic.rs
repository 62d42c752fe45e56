//! Evaluator protocol: pure functions from answers to a logic outcome.
//!
//! Evaluators are deterministic and side-effect-free. They run once per
//! new screening answer and once more at list completion, so they must be
//! idempotent against a stable answer set.

use crate::answer::AnswerSet;
use crate::severity::TriageLevel;
use serde::{Deserialize, Serialize};

/// What the engine should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicAction {
    /// Keep asking / move on to follow-ups
    Continue,
    /// Also run another symptom module
    Branch,
    /// Finish this symptom now
    Stop,
}

/// Outcome of one evaluator invocation. Transient, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicResult {
    pub action: LogicAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage_level: Option<TriageLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_to: Option<String>,
}

impl LogicResult {
    /// Plain continue with no triage change.
    pub fn proceed() -> Self {
        Self {
            action: LogicAction::Continue,
            triage_level: None,
            triage_message: None,
            branch_to: None,
        }
    }

    /// Continue, but carry a running triage hint.
    pub fn note(level: TriageLevel, message: impl Into<String>) -> Self {
        Self {
            action: LogicAction::Continue,
            triage_level: Some(level),
            triage_message: Some(message.into()),
            branch_to: None,
        }
    }

    /// Finish the symptom with a triage outcome.
    pub fn stop(level: TriageLevel, message: impl Into<String>) -> Self {
        Self {
            action: LogicAction::Stop,
            triage_level: Some(level),
            triage_message: Some(message.into()),
            branch_to: None,
        }
    }

    /// Redirect into another symptom module.
    pub fn branch(target: impl Into<String>) -> Self {
        Self {
            action: LogicAction::Branch,
            triage_level: None,
            triage_message: None,
            branch_to: Some(target.into()),
        }
    }

    /// Attach a triage outcome to an existing result (e.g. a branch that
    /// also escalates).
    pub fn with_triage(mut self, level: TriageLevel, message: impl Into<String>) -> Self {
        self.triage_level = Some(level);
        self.triage_message = Some(message.into());
        self
    }

    pub fn is_stop(&self) -> bool {
        self.action == LogicAction::Stop
    }

    /// True when the result demands an immediate 911 escalation,
    /// regardless of action.
    pub fn is_emergency(&self) -> bool {
        self.triage_level == Some(TriageLevel::Call911)
    }
}

/// Per-symptom screening/follow-up logic: a stateless strategy over the
/// accumulated answers.
pub type Evaluator = fn(&AnswerSet) -> LogicResult;
