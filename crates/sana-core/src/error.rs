//! Error types for Sana.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Unknown symptom id: {0}")]
    UnknownSymptom(String),

    #[error("Catalog is inconsistent: {0}")]
    CatalogInvalid(String),

    #[error("No symptoms selected")]
    EmptySelection,

    #[error("No question is awaiting an answer")]
    NotAwaitingAnswer,

    #[error("Answer to '{question}' must be {expected}")]
    AnswerType {
        question: String,
        expected: &'static str,
    },

    #[error("'{value}' is not an option for '{question}'")]
    InvalidOption { question: String, value: String },

    #[error("Session is already complete; use continue_session or reset")]
    SessionComplete,

    #[error("Session is not complete yet")]
    NotComplete,
}
