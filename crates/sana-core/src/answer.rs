//! Answer values and per-session answer sets.
//!
//! Two sets exist per session: a local set reseeded when a symptom module
//! starts, and a global set that only ever grows. Sharing one question id
//! across modules makes it the same fact; the sequencer never asks it twice.
//!
//! Numeric facts are parsed defensively: a number question may hold a raw
//! string, and an unparsable value never satisfies a threshold.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One answer, tagged by shape rather than by question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Yes/no answer
    Bool(bool),
    /// Free text, stored verbatim (never parsed for intent)
    Text(String),
    /// Parsed numeric answer
    Number(f64),
    /// Single selected option value
    Choice(String),
    /// Selected option values of a multiselect
    Multi(BTreeSet<String>),
}

impl AnswerValue {
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Bool(true) => write!(f, "Yes"),
            AnswerValue::Bool(false) => write!(f, "No"),
            AnswerValue::Text(s) | AnswerValue::Choice(s) => write!(f, "{}", s),
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Multi(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// Mapping from question id to answer value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, overwriting any previous value for the id.
    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.answers.insert(id.into(), value);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.answers.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    /// Yes/no fact, if answered as one.
    pub fn bool(&self, id: &str) -> Option<bool> {
        match self.answers.get(id) {
            Some(AnswerValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Convenience: answered and answered "yes".
    pub fn is_yes(&self, id: &str) -> bool {
        self.bool(id) == Some(true)
    }

    /// Numeric fact with defensive parsing.
    ///
    /// Accepts a stored number or a raw string that parses as one.
    /// Anything else is `None`, which fails every threshold check.
    pub fn number(&self, id: &str) -> Option<f64> {
        match self.answers.get(id) {
            Some(AnswerValue::Number(n)) if n.is_finite() => Some(*n),
            Some(AnswerValue::Text(s)) | Some(AnswerValue::Choice(s)) => {
                s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Free-text or choice value as a string.
    pub fn text(&self, id: &str) -> Option<&str> {
        match self.answers.get(id) {
            Some(AnswerValue::Text(s)) | Some(AnswerValue::Choice(s)) => Some(s),
            _ => None,
        }
    }

    /// Selected value of a choice question.
    pub fn choice(&self, id: &str) -> Option<&str> {
        match self.answers.get(id) {
            Some(AnswerValue::Choice(s)) => Some(s),
            _ => None,
        }
    }

    /// True if `value` was picked: a multiselect containing it, or a
    /// choice equal to it.
    pub fn selected(&self, id: &str, value: &str) -> bool {
        match self.answers.get(id) {
            Some(AnswerValue::Multi(set)) => set.contains(value),
            Some(AnswerValue::Choice(s)) => s == value,
            _ => false,
        }
    }

    /// Number of selected values in a multiselect answer.
    pub fn selected_count(&self, id: &str) -> usize {
        match self.answers.get(id) {
            Some(AnswerValue::Multi(set)) => set.len(),
            _ => 0,
        }
    }

    /// Copy every answer from `other` into this set.
    /// Used to seed a module's local set from the global set.
    pub fn merge_from(&mut self, other: &AnswerSet) {
        for (id, value) in &other.answers {
            self.answers.insert(id.clone(), value.clone());
        }
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_defensive_parse() {
        let mut answers = AnswerSet::new();
        answers.insert("temp", AnswerValue::Number(101.5));
        answers.insert("count", AnswerValue::Text(" 4 ".to_string()));
        answers.insert("junk", AnswerValue::Text("about a hundred".to_string()));

        assert_eq!(answers.number("temp"), Some(101.5));
        assert_eq!(answers.number("count"), Some(4.0));
        assert_eq!(answers.number("junk"), None);
        assert_eq!(answers.number("missing"), None);
    }

    #[test]
    fn test_non_finite_never_parses() {
        let mut answers = AnswerSet::new();
        answers.insert("a", AnswerValue::Number(f64::NAN));
        answers.insert("b", AnswerValue::Text("inf".to_string()));
        assert_eq!(answers.number("a"), None);
        assert_eq!(answers.number("b"), None);
    }

    #[test]
    fn test_selected_covers_choice_and_multi() {
        let mut answers = AnswerSet::new();
        answers.insert("appearance", AnswerValue::Choice("blood".to_string()));
        answers.insert("extras", AnswerValue::multi(["chills", "rash"]));

        assert!(answers.selected("appearance", "blood"));
        assert!(!answers.selected("appearance", "bile"));
        assert!(answers.selected("extras", "rash"));
        assert_eq!(answers.selected_count("extras"), 2);
    }

    #[test]
    fn test_merge_from_seeds_local() {
        let mut global = AnswerSet::new();
        global.insert("body_temp_f", AnswerValue::Number(98.6));

        let mut local = AnswerSet::new();
        local.merge_from(&global);
        assert!(local.contains("body_temp_f"));
    }

    #[test]
    fn test_display_for_transcript_echo() {
        assert_eq!(AnswerValue::Bool(true).to_string(), "Yes");
        assert_eq!(AnswerValue::Bool(false).to_string(), "No");
        assert_eq!(AnswerValue::multi(["b", "a"]).to_string(), "a, b");
    }
}
