//! Flu-like illness. Hidden: only reachable by branching from fever.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::{ChoiceOption, Question};
use crate::severity::TriageLevel;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::FLU,
        "Flu-like illness",
        SymptomCategory::Other,
        vec![
            Question::multiselect(
                "flu_symptoms",
                "Which of these do you have right now?",
                vec![
                    ChoiceOption::new("chills", "Chills"),
                    ChoiceOption::new("body_aches", "Body aches"),
                    ChoiceOption::new("fatigue", "Fatigue"),
                    ChoiceOption::new("cough", "Cough"),
                    ChoiceOption::new("congestion", "Congestion"),
                    ChoiceOption::new("sore_throat", "Sore throat"),
                ],
            ),
            Question::yes_no(
                "high_risk_contact",
                "Does anyone in your home belong to a high-risk group (over 65, pregnant, or immunocompromised)?",
            ),
        ],
        screening,
    )
    .hidden()
}

fn screening(answers: &AnswerSet) -> LogicResult {
    let symptom_count = answers.selected_count("flu_symptoms");
    let high_risk = answers.is_yes("high_risk_contact");

    if symptom_count >= 3 && high_risk {
        return LogicResult::note(
            TriageLevel::NotifyCareTeam,
            "Flu-like illness in a high-risk household",
        );
    }
    if symptom_count >= 3 {
        return LogicResult::note(TriageLevel::ReferProvider, "Multiple flu-like symptoms");
    }
    if high_risk {
        return LogicResult::note(TriageLevel::ReferProvider, "High-risk household contacts");
    }
    LogicResult::proceed()
}
