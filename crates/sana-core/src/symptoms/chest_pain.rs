//! Chest pain. Crushing pressure, radiation, or a five-minute episode are
//! all treated as cardiac until proven otherwise.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::{ChoiceOption, Question};
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::CHEST_PAIN,
        "Chest pain",
        SymptomCategory::Emergency,
        vec![
            Question::yes_no("chest_pain_now", "Are you having chest pain right now?"),
            Question::choice(
                "chest_pain_quality",
                "Which best describes the pain?",
                vec![
                    ChoiceOption::new("pressure", "Crushing or squeezing pressure"),
                    ChoiceOption::new("sharp", "Sharp or stabbing"),
                    ChoiceOption::new("burning", "Burning"),
                    ChoiceOption::new("dull", "Dull ache"),
                ],
            )
            .when(|a| a.is_yes("chest_pain_now")),
        ],
        screening,
    )
    .with_follow_up(
        vec![
            Question::yes_no(
                "pain_radiates",
                "Does the pain spread to your arm, jaw or back?",
            ),
            Question::number(
                "pain_duration_min",
                "How many minutes has this episode lasted?",
            ),
        ],
        follow_up,
    )
}

fn screening(answers: &AnswerSet) -> LogicResult {
    match answers.bool("chest_pain_now") {
        Some(false) => LogicResult::stop(TriageLevel::None, "No active chest pain right now."),
        Some(true) => {
            if answers.selected("chest_pain_quality", "pressure") {
                LogicResult::stop(TriageLevel::Call911, "Crushing chest pressure")
            } else {
                LogicResult::note(TriageLevel::NotifyCareTeam, "Active chest pain")
            }
        }
        None => LogicResult::proceed(),
    }
}

fn follow_up(answers: &AnswerSet) -> LogicResult {
    if answers.is_yes("pain_radiates") {
        return LogicResult::stop(
            TriageLevel::Call911,
            "Chest pain radiating to arm, jaw or back",
        );
    }
    if answers
        .number("pain_duration_min")
        .is_some_and(|m| m >= 5.0)
    {
        return LogicResult::stop(
            TriageLevel::Call911,
            "Chest pain lasting five minutes or more",
        );
    }
    LogicResult::stop(
        TriageLevel::NotifyCareTeam,
        "Chest pain without red flags today",
    )
}
