//! Diarrhea. Follow-up can queue the dehydration module as an
//! additional check.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::Question;
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::DIARRHEA,
        "Diarrhea",
        SymptomCategory::Common,
        vec![
            Question::number("diarrhea_days", "How many days have you had diarrhea?"),
            Question::yes_no("bloody_stool", "Have you seen blood in your stool?"),
        ],
        screening,
    )
    .with_follow_up(
        vec![Question::yes_no(
            "dehydration_signs",
            "Do you feel very thirsty, dizzy, or dry-mouthed?",
        )],
        follow_up,
    )
    .branches_to(&[super::DEHYDRATION])
}

fn screening(answers: &AnswerSet) -> LogicResult {
    if answers.is_yes("bloody_stool") {
        return LogicResult::stop(TriageLevel::NotifyCareTeam, "Blood in stool");
    }
    if answers.number("diarrhea_days").is_some_and(|d| d >= 7.0) {
        return LogicResult::note(
            TriageLevel::ReferProvider,
            "Diarrhea lasting a week or more",
        );
    }
    LogicResult::proceed()
}

fn follow_up(answers: &AnswerSet) -> LogicResult {
    if answers.is_yes("dehydration_signs") {
        return LogicResult::branch(super::DEHYDRATION);
    }
    LogicResult::proceed()
}
