//! Dehydration. Follow-up reuses the shared `body_temp_f` and
//! `vomited_24h` facts, and a vomiting report also queues that module.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::{ChoiceOption, Question};
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::DEHYDRATION,
        "Dehydration",
        SymptomCategory::Common,
        vec![
            Question::yes_no(
                "very_thirsty",
                "Are you much thirstier than usual, or is your mouth very dry?",
            ),
            Question::yes_no(
                "low_urine",
                "Have you urinated less than usual over the last day?",
            ),
            Question::choice(
                "standing_dizzy",
                "Do you feel dizzy or lightheaded when you stand up?",
                vec![
                    ChoiceOption::new("no", "No"),
                    ChoiceOption::new("mild", "A little"),
                    ChoiceOption::new("severe", "Badly — I nearly faint"),
                ],
            ),
        ],
        screening,
    )
    .with_follow_up(
        vec![
            Question::yes_no("vomited_24h", "Have you vomited in the last 24 hours?"),
            Question::number(
                "fluid_cups",
                "About how many cups of fluid have you kept down today?",
            ),
            Question::number("body_temp_f", "What is your temperature right now, in °F?"),
        ],
        follow_up,
    )
    .branches_to(&[super::VOMITING])
}

fn screening(answers: &AnswerSet) -> LogicResult {
    if answers.selected("standing_dizzy", "severe") {
        return LogicResult::note(TriageLevel::NotifyCareTeam, "Near-fainting when standing");
    }
    if answers.is_yes("very_thirsty") && answers.is_yes("low_urine") {
        return LogicResult::note(
            TriageLevel::ReferProvider,
            "Reduced urination with marked thirst",
        );
    }
    LogicResult::proceed()
}

fn follow_up(answers: &AnswerSet) -> LogicResult {
    let fluids_low = answers.number("fluid_cups").is_some_and(|c| c < 2.0);
    let feverish = answers.number("body_temp_f").is_some_and(|t| t >= 100.4);

    // "Also check" branch: vomiting gets its own module run, but this
    // symptom still completes on its own merits.
    let base = if answers.is_yes("vomited_24h") {
        LogicResult::branch(super::VOMITING)
    } else {
        LogicResult::proceed()
    };

    if fluids_low {
        base.with_triage(TriageLevel::NotifyCareTeam, "Unable to keep fluids down")
    } else if feverish {
        base.with_triage(
            TriageLevel::ReferProvider,
            "Fever alongside dehydration signs",
        )
    } else {
        base
    }
}
