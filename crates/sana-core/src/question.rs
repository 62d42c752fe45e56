//! Questions, answer validation and the question sequencer.
//!
//! A question id is the identity of a fact: two modules using the same id
//! share the answer, and `next_unanswered` is the single mechanism that
//! keeps an already-known fact from being asked again.

use crate::answer::{AnswerSet, AnswerValue};
use crate::error::TriageError;
use serde::{Deserialize, Serialize};

/// Precondition predicate: the question applies only when this holds.
pub type Condition = fn(&AnswerSet) -> bool;

/// Shape of the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    YesNo,
    Text,
    Number,
    Choice,
    Multiselect,
}

impl QuestionType {
    /// Short description used in answer-type error messages.
    pub fn expected(self) -> &'static str {
        match self {
            QuestionType::YesNo => "yes or no",
            QuestionType::Text => "free text",
            QuestionType::Number => "a number",
            QuestionType::Choice => "one of the listed options",
            QuestionType::Multiselect => "a subset of the listed options",
        }
    }
}

/// One selectable option of a choice/multiselect question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Display label
    pub label: String,
    /// Stable value stored in the answer set
    pub value: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single interview question, catalog-owned and immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Fact id, unique within its owning question list
    pub id: String,
    /// Prompt shown to the patient
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// Options, required for choice/multiselect
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Optional precondition; absent means always applicable
    #[serde(skip)]
    pub condition: Option<Condition>,
}

impl Question {
    fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options: Vec::new(),
            condition: None,
        }
    }

    pub fn yes_no(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionType::YesNo)
    }

    pub fn free_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionType::Text)
    }

    pub fn number(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionType::Number)
    }

    pub fn choice(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        let mut q = Self::new(id, text, QuestionType::Choice);
        q.options = options;
        q
    }

    pub fn multiselect(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        let mut q = Self::new(id, text, QuestionType::Multiselect);
        q.options = options;
        q
    }

    /// Attach a precondition.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether the question applies given the answers so far.
    pub fn applies(&self, answers: &AnswerSet) -> bool {
        self.condition.map_or(true, |cond| cond(answers))
    }

    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Validate an inbound answer against the declared question type.
    ///
    /// Number questions accept raw strings, including unparsable ones;
    /// defensive parsing happens at evaluator level.
    pub fn validate_answer(&self, value: &AnswerValue) -> Result<(), TriageError> {
        let mismatch = || TriageError::AnswerType {
            question: self.id.clone(),
            expected: self.kind.expected(),
        };

        match (self.kind, value) {
            (QuestionType::YesNo, AnswerValue::Bool(_)) => Ok(()),
            (QuestionType::Text, AnswerValue::Text(_)) => Ok(()),
            (QuestionType::Number, AnswerValue::Number(_))
            | (QuestionType::Number, AnswerValue::Text(_)) => Ok(()),
            (QuestionType::Choice, AnswerValue::Choice(picked)) => {
                if self.has_option(picked) {
                    Ok(())
                } else {
                    Err(TriageError::InvalidOption {
                        question: self.id.clone(),
                        value: picked.clone(),
                    })
                }
            }
            (QuestionType::Multiselect, AnswerValue::Multi(picked)) => {
                match picked.iter().find(|v| !self.has_option(v)) {
                    Some(bad) => Err(TriageError::InvalidOption {
                        question: self.id.clone(),
                        value: bad.clone(),
                    }),
                    None => Ok(()),
                }
            }
            _ => Err(mismatch()),
        }
    }
}

/// Linear scan from `start` for the first question that is still
/// unanswered and whose precondition holds. Returns `None` when the list
/// is exhausted. An id answered in an earlier module is skipped here,
/// even on first entry to this module.
pub fn next_unanswered(questions: &[Question], start: usize, answers: &AnswerSet) -> Option<usize> {
    questions
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, q)| !answers.contains(&q.id) && q.applies(answers))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Vec<ChoiceOption> {
        vec![
            ChoiceOption::new("mild", "Mild"),
            ChoiceOption::new("severe", "Severe"),
        ]
    }

    #[test]
    fn test_validate_yes_no() {
        let q = Question::yes_no("q1", "Really?");
        assert!(q.validate_answer(&AnswerValue::Bool(true)).is_ok());
        assert!(matches!(
            q.validate_answer(&AnswerValue::Text("yes".into())),
            Err(TriageError::AnswerType { .. })
        ));
    }

    #[test]
    fn test_validate_number_accepts_raw_text() {
        let q = Question::number("temp", "Temperature?");
        assert!(q.validate_answer(&AnswerValue::Number(101.5)).is_ok());
        // Unparsable raw text is accepted here; evaluators parse defensively.
        assert!(q.validate_answer(&AnswerValue::Text("dunno".into())).is_ok());
        assert!(q.validate_answer(&AnswerValue::Bool(true)).is_err());
    }

    #[test]
    fn test_validate_choice_must_match_option() {
        let q = Question::choice("sev", "How bad?", opts());
        assert!(q.validate_answer(&AnswerValue::Choice("mild".into())).is_ok());
        assert!(matches!(
            q.validate_answer(&AnswerValue::Choice("awful".into())),
            Err(TriageError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_validate_multiselect_subset() {
        let q = Question::multiselect("sev", "Which apply?", opts());
        assert!(q.validate_answer(&AnswerValue::multi(["mild"])).is_ok());
        assert!(q
            .validate_answer(&AnswerValue::multi(["mild", "severe"]))
            .is_ok());
        assert!(q
            .validate_answer(&AnswerValue::multi(["mild", "bogus"]))
            .is_err());
    }

    #[test]
    fn test_next_unanswered_skips_known_facts() {
        let questions = vec![
            Question::number("body_temp_f", "Temperature?"),
            Question::yes_no("chills", "Chills?"),
        ];
        let mut answers = AnswerSet::new();
        answers.insert("body_temp_f", AnswerValue::Number(99.1));

        assert_eq!(next_unanswered(&questions, 0, &answers), Some(1));
        answers.insert("chills", AnswerValue::Bool(false));
        assert_eq!(next_unanswered(&questions, 0, &answers), None);
    }

    #[test]
    fn test_next_unanswered_honors_condition() {
        let questions = vec![
            Question::yes_no("taking_reducer", "Took a fever reducer?"),
            Question::number("reducer_hours_ago", "How many hours ago?")
                .when(|a| a.is_yes("taking_reducer")),
        ];
        let mut answers = AnswerSet::new();
        answers.insert("taking_reducer", AnswerValue::Bool(false));

        // Condition is false, so the follow-on question never surfaces.
        assert_eq!(next_unanswered(&questions, 0, &answers), None);

        answers.insert("taking_reducer", AnswerValue::Bool(true));
        assert_eq!(next_unanswered(&questions, 1, &answers), Some(1));
    }
}
