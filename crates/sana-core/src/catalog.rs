//! Symptom catalog: static registry of symptom definitions.
//!
//! Pure data plus lookup. Definitions are built once at startup and never
//! mutated; a catalog is safely shared across any number of sessions.
//!
//! Internal consistency is checked at load, not per session: duplicate
//! ids, option-less choice questions and unresolvable branch targets are
//! all fatal configuration errors.

use crate::error::TriageError;
use crate::logic::Evaluator;
use crate::question::{Question, QuestionType};
use crate::symptoms;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a symptom appears in top-level listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    Emergency,
    Common,
    Other,
}

impl std::fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymptomCategory::Emergency => write!(f, "emergency"),
            SymptomCategory::Common => write!(f, "common"),
            SymptomCategory::Other => write!(f, "other"),
        }
    }
}

/// One symptom module: identity, question lists and evaluators.
#[derive(Debug, Clone)]
pub struct SymptomDefinition {
    /// Stable string key (e.g. "FEV-202")
    pub id: String,
    /// Patient-facing name
    pub name: String,
    pub category: SymptomCategory,
    /// Excluded from top-level listings, reachable only via branching
    pub hidden: bool,
    pub screening: Vec<Question>,
    pub evaluate_screening: Evaluator,
    pub follow_up: Vec<Question>,
    pub evaluate_follow_up: Option<Evaluator>,
    /// Symptom ids this module's evaluators may branch to.
    /// Declared up front so the catalog can validate them at load.
    pub branches_to: Vec<String>,
}

impl SymptomDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: SymptomCategory,
        screening: Vec<Question>,
        evaluate_screening: Evaluator,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            hidden: false,
            screening,
            evaluate_screening,
            follow_up: Vec::new(),
            evaluate_follow_up: None,
            branches_to: Vec::new(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_follow_up(mut self, questions: Vec<Question>, evaluator: Evaluator) -> Self {
        self.follow_up = questions;
        self.evaluate_follow_up = Some(evaluator);
        self
    }

    pub fn branches_to(mut self, targets: &[&str]) -> Self {
        self.branches_to = targets.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Serializable listing metadata (evaluators are not serializable).
    pub fn info(&self) -> SymptomInfo {
        SymptomInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            hidden: self.hidden,
            screening_questions: self.screening.len(),
            follow_up_questions: self.follow_up.len(),
        }
    }
}

/// Listing metadata for one symptom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomInfo {
    pub id: String,
    pub name: String,
    pub category: SymptomCategory,
    pub hidden: bool,
    pub screening_questions: usize,
    pub follow_up_questions: usize,
}

/// Registry of symptom definitions, keyed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    symptoms: Vec<SymptomDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, failing on any internal inconsistency.
    pub fn new(symptoms: Vec<SymptomDefinition>) -> Result<Self, TriageError> {
        let mut index = HashMap::new();
        for (i, def) in symptoms.iter().enumerate() {
            if index.insert(def.id.clone(), i).is_some() {
                return Err(TriageError::CatalogInvalid(format!(
                    "duplicate symptom id '{}'",
                    def.id
                )));
            }
        }

        let catalog = Self { symptoms, index };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The builtin symptom catalog. Its consistency is covered by tests,
    /// so a validation failure here is unreachable in a released build.
    pub fn builtin() -> Self {
        Self::new(symptoms::builtin()).expect("builtin catalog must be internally consistent")
    }

    fn validate(&self) -> Result<(), TriageError> {
        for def in &self.symptoms {
            for target in &def.branches_to {
                if !self.index.contains_key(target) {
                    return Err(TriageError::CatalogInvalid(format!(
                        "symptom '{}' branches to unknown id '{}'",
                        def.id, target
                    )));
                }
            }
            for q in def.screening.iter().chain(def.follow_up.iter()) {
                let needs_options =
                    matches!(q.kind, QuestionType::Choice | QuestionType::Multiselect);
                if needs_options && q.options.is_empty() {
                    return Err(TriageError::CatalogInvalid(format!(
                        "question '{}' of '{}' has no options",
                        q.id, def.id
                    )));
                }
            }
            if def.screening.is_empty() {
                return Err(TriageError::CatalogInvalid(format!(
                    "symptom '{}' has no screening questions",
                    def.id
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&SymptomDefinition> {
        self.index.get(id).map(|i| &self.symptoms[*i])
    }

    pub fn require(&self, id: &str) -> Result<&SymptomDefinition, TriageError> {
        self.get(id)
            .ok_or_else(|| TriageError::UnknownSymptom(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All symptoms, hidden included.
    pub fn iter(&self) -> impl Iterator<Item = &SymptomDefinition> {
        self.symptoms.iter()
    }

    /// Top-level listing: hidden symptoms filtered out.
    pub fn listing(&self) -> Vec<SymptomInfo> {
        self.symptoms
            .iter()
            .filter(|d| !d.hidden)
            .map(|d| d.info())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}
