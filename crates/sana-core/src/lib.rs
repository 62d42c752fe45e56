//! Sana core: conversational symptom-triage engine.
//!
//! Walks a patient through one or more symptom modules, one question at a
//! time, and aggregates the answers into a clinical escalation level.
//! The engine is synchronous and single-threaded; rendering, pacing and
//! persistence belong to the caller.

pub mod answer;
pub mod catalog;
pub mod error;
pub mod logic;
pub mod question;
pub mod session;
pub mod severity;
pub mod summary;
pub mod symptoms;
pub mod transcript;

pub use answer::{AnswerSet, AnswerValue};
pub use catalog::{Catalog, SymptomCategory, SymptomDefinition, SymptomInfo};
pub use error::TriageError;
pub use logic::{Evaluator, LogicAction, LogicResult};
pub use question::{ChoiceOption, Question, QuestionType};
pub use session::{SessionEngine, Stage, SymptomQueue};
pub use severity::{ReasonList, TriageLevel};
pub use summary::{SessionSummary, SymptomOutcome};
pub use transcript::{EntryKind, Speaker, Transcript, TranscriptEntry};

/// Suggested settling delay between symptom modules, in milliseconds.
/// Presentation pacing only; the engine never sleeps.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 900;
