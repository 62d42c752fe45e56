//! Vomiting. Blood or coffee-ground appearance is an emergency; the
//! free-text note is stored verbatim and never parsed.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::{ChoiceOption, Question};
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::VOMITING,
        "Vomiting",
        SymptomCategory::Common,
        vec![
            Question::yes_no("vomited_24h", "Have you vomited in the last 24 hours?"),
            Question::number(
                "vomit_count",
                "How many times have you vomited in the last 24 hours?",
            ),
            Question::choice(
                "vomit_appearance",
                "What does the vomit look like?",
                vec![
                    ChoiceOption::new("normal", "Normal stomach contents"),
                    ChoiceOption::new("blood", "Bright red or bloody"),
                    ChoiceOption::new("coffee_grounds", "Dark, like coffee grounds"),
                    ChoiceOption::new("bile", "Green or yellow bile"),
                ],
            ),
        ],
        screening,
    )
    .with_follow_up(
        vec![
            Question::yes_no("keeps_fluids", "Can you keep sips of fluid down?"),
            Question::free_text(
                "vomit_notes",
                "Anything else about the vomiting we should know?",
            ),
        ],
        follow_up,
    )
}

fn screening(answers: &AnswerSet) -> LogicResult {
    if answers.bool("vomited_24h") == Some(false) {
        return LogicResult::stop(TriageLevel::None, "No vomiting in the last 24 hours.");
    }
    if answers.selected("vomit_appearance", "blood")
        || answers.selected("vomit_appearance", "coffee_grounds")
    {
        return LogicResult::stop(TriageLevel::Call911, "Possible blood in vomit");
    }
    if answers.number("vomit_count").is_some_and(|n| n >= 6.0) {
        return LogicResult::note(
            TriageLevel::NotifyCareTeam,
            "Vomiting six or more times in a day",
        );
    }
    LogicResult::proceed()
}

fn follow_up(answers: &AnswerSet) -> LogicResult {
    if answers.bool("keeps_fluids") == Some(false) {
        return LogicResult::stop(TriageLevel::NotifyCareTeam, "Unable to keep fluids down");
    }
    if answers.number("vomit_count").is_some_and(|n| n >= 3.0) {
        return LogicResult::stop(TriageLevel::ReferProvider, "Repeated vomiting episodes");
    }
    LogicResult::proceed()
}
