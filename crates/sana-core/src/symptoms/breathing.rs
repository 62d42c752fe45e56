//! Difficulty breathing. One screening question; a "yes" is always 911.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::Question;
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::BREATHING,
        "Difficulty breathing",
        SymptomCategory::Emergency,
        vec![Question::yes_no(
            "severe_breathing",
            "Are you struggling to breathe, or unable to speak a full sentence?",
        )],
        screening,
    )
}

fn screening(answers: &AnswerSet) -> LogicResult {
    match answers.bool("severe_breathing") {
        Some(true) => LogicResult::stop(TriageLevel::Call911, "Severe difficulty breathing"),
        Some(false) => LogicResult::stop(
            TriageLevel::None,
            "No severe breathing difficulty right now.",
        ),
        None => LogicResult::proceed(),
    }
}
