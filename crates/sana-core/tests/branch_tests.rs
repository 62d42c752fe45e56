//! Tests for branching between symptom modules and shared facts.

use sana_core::{
    symptoms, AnswerValue, Catalog, LogicResult, Question, SessionEngine, Stage,
    SymptomCategory, SymptomDefinition, TriageLevel,
};
use std::sync::Arc;

fn engine() -> SessionEngine {
    SessionEngine::new(Arc::new(Catalog::builtin()))
}

fn current_id(engine: &SessionEngine) -> String {
    engine
        .current_question()
        .expect("a question should be pending")
        .id
        .clone()
}

fn settle(engine: &mut SessionEngine) {
    let generation = engine
        .pending_generation()
        .expect("a next symptom should be parked");
    engine.advance(generation);
}

#[test]
fn test_nausea_screening_redirects_to_vomiting() {
    let mut engine = engine();
    engine.start(&[symptoms::NAUSEA]).unwrap();

    assert_eq!(current_id(&engine), "vomited_24h");
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    // Branch is only acted on at full-list evaluation; the remaining
    // screening question is still asked first.
    assert_eq!(current_id(&engine), "nausea_days");
    engine.submit_answer(AnswerValue::Number(1.0)).unwrap();

    // Nausea completed, vomiting queued at the front.
    assert_eq!(engine.queued(), vec![symptoms::VOMITING]);
    settle(&mut engine);

    // Shared fact: vomited_24h was answered in the nausea module and is
    // never asked again here.
    assert_eq!(engine.visited().last().unwrap(), symptoms::VOMITING);
    assert_eq!(current_id(&engine), "vomit_count");
}

#[test]
fn test_branch_loop_is_broken_by_visited_guard() {
    let mut engine = engine();
    engine
        .start(&[symptoms::VOMITING, symptoms::NAUSEA])
        .unwrap();

    // Vomiting first (priority), patient reports vomiting.
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Number(2.0)).unwrap();
    engine
        .submit_answer(AnswerValue::Choice("normal".into()))
        .unwrap();
    // Follow-up.
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine
        .submit_answer(AnswerValue::Text("felt dizzy after dinner".into()))
        .unwrap();

    settle(&mut engine);
    // Nausea: vomited_24h is already known, so only duration is asked.
    assert_eq!(current_id(&engine), "nausea_days");
    engine.submit_answer(AnswerValue::Number(1.0)).unwrap();

    // Nausea branches back to vomiting, which was already visited: the
    // branch is dropped and the session drains to completion.
    assert_eq!(engine.stage(), Stage::Complete);
    assert_eq!(engine.visited().len(), 2);

    let summary = engine.summary();
    assert!(summary.notes.contains(&"felt dizzy after dinner".to_string()));
}

#[test]
fn test_branch_dedup_removes_stale_queue_occurrence() {
    let mut engine = engine();
    engine
        .start(&[symptoms::DEHYDRATION, symptoms::FEVER, symptoms::VOMITING])
        .unwrap();
    assert_eq!(
        engine.queued(),
        vec![symptoms::FEVER, symptoms::VOMITING]
    );

    // Dehydration screening.
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Choice("no".into())).unwrap();
    // Follow-up: vomiting reported, barely any fluids kept down.
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Number(1.0)).unwrap();
    engine.submit_answer(AnswerValue::Number(98.6)).unwrap();

    // Vomiting moved from the back of the queue to the front, once.
    assert_eq!(
        engine.queued(),
        vec![symptoms::VOMITING, symptoms::FEVER]
    );
    assert_eq!(
        engine.symptom_result(symptoms::DEHYDRATION),
        Some(TriageLevel::NotifyCareTeam)
    );

    settle(&mut engine);
    // vomited_24h is shared with the dehydration follow-up.
    assert_eq!(current_id(&engine), "vomit_count");
    engine.submit_answer(AnswerValue::Number(2.0)).unwrap();
    engine
        .submit_answer(AnswerValue::Choice("normal".into()))
        .unwrap();
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Text("".into())).unwrap();

    settle(&mut engine);
    // Fever's only screening question (body_temp_f) was answered during
    // the dehydration follow-up, so the module evaluates immediately.
    assert_eq!(engine.stage(), Stage::Complete);

    let summary = engine.summary();
    let ids: Vec<&str> = summary
        .symptoms
        .iter()
        .map(|s| s.symptom_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![symptoms::DEHYDRATION, symptoms::VOMITING, symptoms::FEVER]
    );
}

#[test]
fn test_dehydration_end_to_end_lists_both_symptoms() {
    let mut engine = engine();
    engine.start(&[symptoms::DEHYDRATION]).unwrap();

    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Bool(false)).unwrap();
    engine
        .submit_answer(AnswerValue::Choice("mild".into()))
        .unwrap();
    // Follow-up: has_vomiting fact triggers the branch.
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();
    engine.submit_answer(AnswerValue::Number(4.0)).unwrap();
    engine.submit_answer(AnswerValue::Number(98.6)).unwrap();

    settle(&mut engine);
    engine.submit_answer(AnswerValue::Number(7.0)).unwrap();
    engine
        .submit_answer(AnswerValue::Choice("bile".into()))
        .unwrap();
    // Vomiting follow-up: cannot keep fluids down.
    engine.submit_answer(AnswerValue::Bool(false)).unwrap();
    engine
        .submit_answer(AnswerValue::Text("worse since last night".into()))
        .unwrap();

    assert_eq!(engine.stage(), Stage::Complete);
    let summary = engine.summary();
    let ids: Vec<&str> = summary
        .symptoms
        .iter()
        .map(|s| s.symptom_id.as_str())
        .collect();
    assert_eq!(ids, vec![symptoms::DEHYDRATION, symptoms::VOMITING]);

    // Statuses computed independently per symptom.
    assert_eq!(summary.symptoms[0].status, "Checked / safe");
    assert_eq!(summary.symptoms[1].status, "Alert");
    assert_eq!(summary.highest_severity, TriageLevel::NotifyCareTeam);
    assert!(summary
        .reasons
        .contains(&"Unable to keep fluids down".to_string()));
    // Same reason from two modules appears once.
    assert_eq!(
        summary
            .reasons
            .iter()
            .filter(|r| *r == "Unable to keep fluids down")
            .count(),
        1
    );
}

#[test]
fn test_fever_branches_into_hidden_flu_module() {
    let mut engine = engine();
    engine.start(&[symptoms::FEVER]).unwrap();

    engine.submit_answer(AnswerValue::Number(101.0)).unwrap();
    engine.submit_answer(AnswerValue::Bool(false)).unwrap();
    engine.submit_answer(AnswerValue::Bool(false)).unwrap();
    engine
        .submit_answer(AnswerValue::multi(["body_aches", "cough"]))
        .unwrap();

    // Hidden symptom reachable only via branch.
    assert_eq!(engine.queued(), vec![symptoms::FLU]);
    settle(&mut engine);
    assert_eq!(current_id(&engine), "flu_symptoms");

    engine
        .submit_answer(AnswerValue::multi(["chills", "body_aches", "cough"]))
        .unwrap();
    engine.submit_answer(AnswerValue::Bool(false)).unwrap();

    assert_eq!(engine.stage(), Stage::Complete);
    let summary = engine.summary();
    assert_eq!(summary.symptoms.len(), 2);
    assert!(summary
        .reasons
        .contains(&"Multiple flu-like symptoms".to_string()));
}

#[test]
fn test_undeclared_branch_target_is_refused() {
    // "BBB-002" exists in the catalog but alpha never declares it as a
    // branch target, so it skipped load-time validation entirely.
    let alpha = SymptomDefinition::new(
        "AAA-001",
        "Alpha",
        SymptomCategory::Common,
        vec![Question::yes_no("alpha_flag", "Is the flag set?")],
        |answers| {
            if answers.is_yes("alpha_flag") {
                LogicResult::branch("BBB-002")
            } else {
                LogicResult::proceed()
            }
        },
    );
    let beta = SymptomDefinition::new(
        "BBB-002",
        "Beta",
        SymptomCategory::Common,
        vec![Question::yes_no("beta_flag", "Is the other flag set?")],
        |_| LogicResult::proceed(),
    );
    let catalog = Catalog::new(vec![alpha, beta]).unwrap();

    let mut engine = SessionEngine::new(Arc::new(catalog));
    engine.start(&["AAA-001"]).unwrap();
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();

    // The undeclared target is dropped instead of being queued.
    assert_eq!(engine.stage(), Stage::Complete);
    assert!(engine.queued().is_empty());
    assert_eq!(engine.visited(), &["AAA-001".to_string()]);
}

#[test]
fn test_diarrhea_follow_up_also_checks_dehydration() {
    let mut engine = engine();
    engine.start(&[symptoms::DIARRHEA]).unwrap();

    engine.submit_answer(AnswerValue::Number(2.0)).unwrap();
    engine.submit_answer(AnswerValue::Bool(false)).unwrap();
    engine.submit_answer(AnswerValue::Bool(true)).unwrap();

    // Follow-up branch never blocks completion of the current symptom.
    assert_eq!(
        engine.symptom_result(symptoms::DIARRHEA),
        Some(TriageLevel::None)
    );
    assert_eq!(engine.queued(), vec![symptoms::DEHYDRATION]);
    settle(&mut engine);
    assert_eq!(current_id(&engine), "very_thirsty");
}
