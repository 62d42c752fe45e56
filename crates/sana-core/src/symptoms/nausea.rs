//! Nausea. If the patient has actually vomited, the vomiting module asks
//! the better questions, so screening redirects there.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::Question;
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::NAUSEA,
        "Nausea",
        SymptomCategory::Common,
        vec![
            Question::yes_no("vomited_24h", "Have you vomited in the last 24 hours?"),
            Question::number("nausea_days", "How many days have you felt nauseated?"),
        ],
        screening,
    )
    .branches_to(&[super::VOMITING])
}

fn screening(answers: &AnswerSet) -> LogicResult {
    if answers.is_yes("vomited_24h") {
        return LogicResult::branch(super::VOMITING);
    }
    if answers.number("nausea_days").is_some_and(|d| d >= 3.0) {
        return LogicResult::note(
            TriageLevel::ReferProvider,
            "Nausea lasting three days or more",
        );
    }
    LogicResult::proceed()
}
