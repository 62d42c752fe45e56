//! Fever. Thresholds in °F: 100.4 starts the fever range, 104 is an
//! emergency. An unparsable temperature never clears a threshold.

use crate::answer::AnswerSet;
use crate::catalog::{SymptomCategory, SymptomDefinition};
use crate::logic::LogicResult;
use crate::question::{ChoiceOption, Question};
use crate::severity::TriageLevel;

const FEVER_F: f64 = 100.4;
const EMERGENCY_F: f64 = 104.0;
/// A dose this recent should already have brought the temperature down.
const RECENT_DOSE_H: f64 = 4.0;

pub(super) fn definition() -> SymptomDefinition {
    SymptomDefinition::new(
        super::FEVER,
        "Fever",
        SymptomCategory::Common,
        vec![Question::number(
            "body_temp_f",
            "What is your temperature right now, in °F?",
        )],
        screening,
    )
    .with_follow_up(
        vec![
            Question::yes_no(
                "stiff_neck",
                "Do you have a stiff neck, or does light hurt your eyes?",
            ),
            Question::yes_no(
                "taking_reducer",
                "Have you taken a fever reducer in the last six hours?",
            ),
            Question::number("reducer_hours_ago", "About how many hours ago was the last dose?")
                .when(|a| a.is_yes("taking_reducer")),
            Question::multiselect(
                "fever_symptoms",
                "Anything else along with the fever?",
                vec![
                    ChoiceOption::new("chills", "Chills or shivering"),
                    ChoiceOption::new("body_aches", "Body aches"),
                    ChoiceOption::new("sore_throat", "Sore throat"),
                    ChoiceOption::new("cough", "Cough"),
                    ChoiceOption::new("rash", "A new rash"),
                ],
            ),
        ],
        follow_up,
    )
    .branches_to(&[super::FLU])
}

fn screening(answers: &AnswerSet) -> LogicResult {
    match answers.number("body_temp_f") {
        Some(t) if t >= EMERGENCY_F => {
            LogicResult::stop(TriageLevel::Call911, "Temperature of 104°F or higher")
        }
        Some(t) if t >= FEVER_F => {
            LogicResult::note(TriageLevel::NotifyCareTeam, "Fever of 100.4°F or higher")
        }
        Some(_) => LogicResult::stop(
            TriageLevel::None,
            "That temperature is below the fever range.",
        ),
        None => LogicResult::proceed(),
    }
}

fn follow_up(answers: &AnswerSet) -> LogicResult {
    if answers.is_yes("stiff_neck") {
        return LogicResult::stop(
            TriageLevel::Call911,
            "Fever with stiff neck or light sensitivity",
        );
    }
    if answers.selected("fever_symptoms", "rash") {
        return LogicResult::stop(TriageLevel::NotifyCareTeam, "Fever with a new rash");
    }
    if answers.is_yes("taking_reducer")
        && answers.number("reducer_hours_ago").is_some_and(|h| h <= RECENT_DOSE_H)
        && answers.number("body_temp_f").is_some_and(|t| t >= FEVER_F)
    {
        return LogicResult::stop(
            TriageLevel::NotifyCareTeam,
            "Fever not responding to a recent reducer dose",
        );
    }
    if answers.selected("fever_symptoms", "body_aches") && answers.selected("fever_symptoms", "cough")
    {
        return LogicResult::branch(super::FLU)
            .with_triage(TriageLevel::ReferProvider, "Flu-like symptoms alongside fever");
    }
    LogicResult::proceed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::AnswerValue;
    use crate::logic::LogicAction;

    fn with_temp(value: AnswerValue) -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.insert("body_temp_f", value);
        answers
    }

    #[test]
    fn test_below_range_stops_clean() {
        let result = screening(&with_temp(AnswerValue::Number(100.0)));
        assert!(result.is_stop());
        assert_eq!(result.triage_level, Some(TriageLevel::None));
    }

    #[test]
    fn test_fever_range_notifies_and_continues() {
        let result = screening(&with_temp(AnswerValue::Number(101.5)));
        assert_eq!(result.action, LogicAction::Continue);
        assert_eq!(result.triage_level, Some(TriageLevel::NotifyCareTeam));
    }

    #[test]
    fn test_emergency_threshold() {
        let result = screening(&with_temp(AnswerValue::Number(104.2)));
        assert!(result.is_emergency());
    }

    #[test]
    fn test_recent_reducer_dose_escalates() {
        let mut answers = with_temp(AnswerValue::Number(101.2));
        answers.insert("stiff_neck", AnswerValue::Bool(false));
        answers.insert("taking_reducer", AnswerValue::Bool(true));
        answers.insert("reducer_hours_ago", AnswerValue::Number(2.0));
        answers.insert("fever_symptoms", AnswerValue::multi(Vec::<String>::new()));
        let result = follow_up(&answers);
        assert!(result.is_stop());
        assert_eq!(result.triage_level, Some(TriageLevel::NotifyCareTeam));
    }

    #[test]
    fn test_older_reducer_dose_proceeds() {
        let mut answers = with_temp(AnswerValue::Number(101.2));
        answers.insert("stiff_neck", AnswerValue::Bool(false));
        answers.insert("taking_reducer", AnswerValue::Bool(true));
        answers.insert("reducer_hours_ago", AnswerValue::Number(5.5));
        answers.insert("fever_symptoms", AnswerValue::multi(Vec::<String>::new()));
        assert_eq!(follow_up(&answers), LogicResult::proceed());
    }

    #[test]
    fn test_unparsable_temperature_fails_open() {
        let result = screening(&with_temp(AnswerValue::Text("pretty hot".into())));
        assert_eq!(result, LogicResult::proceed());
    }
}
