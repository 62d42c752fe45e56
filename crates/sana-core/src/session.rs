//! Session engine: one multi-symptom interview.
//!
//! Owns the queue of pending symptoms, the local/global answer sets, the
//! visited set, per-symptom results and the aggregated severity/reasons.
//! Single-threaded and synchronous: every answer is processed to
//! completion before the next input, and the pacing delay between symptom
//! modules lives in the presentation layer. The engine only parks a
//! generation token; a token from before a reset is silently ignored.

use crate::answer::{AnswerSet, AnswerValue};
use crate::catalog::{Catalog, SymptomDefinition};
use crate::error::TriageError;
use crate::logic::{LogicAction, LogicResult};
use crate::question::{self, Question, QuestionType};
use crate::severity::{ReasonList, TriageLevel};
use crate::summary::{SessionSummary, SymptomOutcome};
use crate::symptoms;
use crate::transcript::{Transcript, TranscriptEntry};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Interview stage. Screening and follow-up recur once per queued symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Selection,
    Screening,
    FollowUp,
    Complete,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Selection => write!(f, "selection"),
            Stage::Screening => write!(f, "screening"),
            Stage::FollowUp => write!(f, "followup"),
            Stage::Complete => write!(f, "complete"),
        }
    }
}

/// Ordered pending symptom ids. Branch targets go to the front, and any
/// stale occurrence elsewhere in the queue is removed first.
#[derive(Debug, Clone, Default)]
pub struct SymptomQueue {
    ids: VecDeque<String>,
}

impl SymptomQueue {
    pub fn push_back(&mut self, id: impl Into<String>) {
        self.ids.push_back(id.into());
    }

    pub fn push_front_deduped(&mut self, id: &str) {
        self.ids.retain(|queued| queued != id);
        self.ids.push_front(id.to_string());
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.ids.pop_front()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|queued| queued == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

#[derive(Debug, Clone)]
struct CurrentSymptom {
    id: String,
    /// Index into the active question list, None while mid-transition
    question: Option<usize>,
}

/// One interview session. All session state is owned here; the catalog is
/// shared and read-only.
pub struct SessionEngine {
    catalog: Arc<Catalog>,
    session_id: Uuid,
    /// Bumped on reset; stale parked continuations compare unequal
    generation: u64,
    started: Instant,
    stage: Stage,
    queue: SymptomQueue,
    current: Option<CurrentSymptom>,
    /// Cleared at module start, then seeded from the global set
    local: AnswerSet,
    /// Grows monotonically for the lifetime of the session
    global: AnswerSet,
    /// Append-only, also the dedup gate against branch loops
    visited: Vec<String>,
    /// Highest level reached while processing each symptom
    results: HashMap<String, TriageLevel>,
    highest: TriageLevel,
    reasons: ReasonList,
    /// Free-text answers, verbatim
    notes: Vec<String>,
    transcript: Transcript,
    /// Generation token parked between symptom modules
    pending: Option<u64>,
}

impl SessionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            session_id: Uuid::new_v4(),
            generation: 0,
            started: Instant::now(),
            stage: Stage::Selection,
            queue: SymptomQueue::default(),
            current: None,
            local: AnswerSet::new(),
            global: AnswerSet::new(),
            visited: Vec::new(),
            results: HashMap::new(),
            highest: TriageLevel::None,
            reasons: ReasonList::new(),
            notes: Vec::new(),
            transcript: Transcript::new(),
            pending: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn highest_severity(&self) -> TriageLevel {
        self.highest
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Pending (not yet started) symptom ids, in processing order.
    pub fn queued(&self) -> Vec<&str> {
        self.queue.iter().collect()
    }

    /// Highest level reached while processing one symptom, if visited.
    pub fn symptom_result(&self, id: &str) -> Option<TriageLevel> {
        self.results.get(id).copied()
    }

    /// Begin or extend the interview with the requested symptom ids.
    ///
    /// Ids are re-ordered by the static priority rule before queueing:
    /// vomiting is forced ahead of nausea when both are requested, and
    /// every other id keeps request order.
    pub fn start(&mut self, ids: &[&str]) -> Result<(), TriageError> {
        if ids.is_empty() {
            return Err(TriageError::EmptySelection);
        }
        if self.stage == Stage::Complete {
            return Err(TriageError::SessionComplete);
        }
        for id in ids {
            self.catalog.require(id)?;
        }

        let mut ordered: Vec<String> = Vec::new();
        for id in ids {
            if !ordered.iter().any(|seen| seen == id) {
                ordered.push(id.to_string());
            }
        }
        reorder_priority(&mut ordered);

        for id in ordered {
            let is_current = self.current.as_ref().is_some_and(|c| c.id == id);
            if is_current || self.queue.contains(&id) {
                continue;
            }
            self.queue.push_back(id);
        }
        debug!(session = %self.session_id, queued = self.queue.len(), "symptoms queued");

        if self.stage == Stage::Selection {
            self.begin_next_symptom();
        }
        Ok(())
    }

    /// The question currently awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        let current = self.current.as_ref()?;
        let index = current.question?;
        let def = self.catalog.get(&current.id)?;
        let list = match self.stage {
            Stage::Screening => &def.screening,
            Stage::FollowUp => &def.follow_up,
            _ => return None,
        };
        list.get(index)
    }

    /// Record an answer to the current question and drive the machine
    /// forward: per-answer screening evaluation, short-circuits, question
    /// advancement and full-list evaluation all happen here.
    pub fn submit_answer(&mut self, value: AnswerValue) -> Result<(), TriageError> {
        let catalog = Arc::clone(&self.catalog);
        let current = self.current.as_ref().ok_or(TriageError::NotAwaitingAnswer)?;
        let index = current.question.ok_or(TriageError::NotAwaitingAnswer)?;
        let def = catalog.require(&current.id)?;
        let stage = self.stage;
        let list = match stage {
            Stage::Screening => &def.screening,
            Stage::FollowUp => &def.follow_up,
            _ => return Err(TriageError::NotAwaitingAnswer),
        };
        let question = list.get(index).ok_or(TriageError::NotAwaitingAnswer)?;

        question.validate_answer(&value)?;
        self.transcript
            .push(TranscriptEntry::answer(self.elapsed_ms(), value.to_string()));
        if question.kind == QuestionType::Text {
            if let AnswerValue::Text(text) = &value {
                if !text.trim().is_empty() {
                    self.notes.push(text.clone());
                }
            }
        }
        self.local.insert(question.id.clone(), value.clone());
        self.global.insert(question.id.clone(), value);

        match stage {
            Stage::Screening => self.after_screening_answer(def, index),
            Stage::FollowUp => self.after_follow_up_answer(def, index),
            _ => {}
        }
        Ok(())
    }

    /// Generation token parked between symptom modules, if one is waiting.
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending
    }

    /// Continue with the next queued symptom after the presentation
    /// layer's pacing delay. A stale token (from before a reset) is a
    /// silent no-op against the replaced state.
    pub fn advance(&mut self, generation: u64) {
        if self.pending != Some(generation) || self.generation != generation {
            debug!(generation, "stale advance ignored");
            return;
        }
        self.pending = None;
        self.begin_next_symptom();
    }

    /// Clear all session state back to initial values.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.session_id = Uuid::new_v4();
        self.started = Instant::now();
        self.stage = Stage::Selection;
        self.queue.clear();
        self.current = None;
        self.local.clear();
        self.global.clear();
        self.visited.clear();
        self.results.clear();
        self.highest = TriageLevel::None;
        self.reasons.clear();
        self.notes.clear();
        self.transcript.clear();
        self.pending = None;
        info!(session = %self.session_id, "session reset");
    }

    /// Return to selection while retaining prior findings, so additional
    /// symptoms can be checked within the same session summary.
    pub fn continue_session(&mut self) -> Result<(), TriageError> {
        if self.stage != Stage::Complete {
            return Err(TriageError::NotComplete);
        }
        self.stage = Stage::Selection;
        self.pending = None;
        Ok(())
    }

    /// Session summary: visited symptoms with their final statuses, the
    /// session-wide highest severity and the clinical reasoning list.
    pub fn summary(&self) -> SessionSummary {
        let symptoms = self
            .visited
            .iter()
            .map(|id| {
                let level = self.results.get(id).copied().unwrap_or_default();
                let name = self
                    .catalog
                    .get(id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| id.clone());
                SymptomOutcome {
                    symptom_id: id.clone(),
                    name,
                    level,
                    status: level.status_label().to_string(),
                }
            })
            .collect();

        SessionSummary {
            session_id: self.session_id,
            generated_at: Utc::now(),
            symptoms,
            highest_severity: self.highest,
            reasons: self.reasons.as_slice().to_vec(),
            notes: self.notes.clone(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn push(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    fn begin_next_symptom(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        loop {
            let Some(id) = self.queue.pop_front() else {
                self.current = None;
                self.stage = Stage::Complete;
                self.push(TranscriptEntry::note(
                    self.elapsed_ms(),
                    "Symptom check complete.",
                ));
                info!(session = %self.session_id, highest = %self.highest, "session complete");
                return;
            };

            if self.visited.iter().any(|v| *v == id) {
                // Silent skip-and-continue keeps two symptoms that branch
                // to each other from looping forever.
                let name = catalog
                    .get(&id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| id.clone());
                self.push(TranscriptEntry::note(
                    self.elapsed_ms(),
                    format!("Already checked {} this session — skipping.", name),
                ));
                debug!(symptom = %id, "skipping already-visited symptom");
                continue;
            }

            let Some(def) = catalog.get(&id) else {
                warn!(symptom = %id, "queued symptom missing from catalog");
                continue;
            };

            self.visited.push(id.clone());
            self.results.entry(id.clone()).or_insert(TriageLevel::None);
            self.local.clear();
            self.local.merge_from(&self.global);
            self.stage = Stage::Screening;
            self.current = Some(CurrentSymptom {
                id: id.clone(),
                question: None,
            });
            self.push(TranscriptEntry::symptom_start(
                self.elapsed_ms(),
                &id,
                &def.name,
            ));
            info!(symptom = %id, "starting symptom module");

            match question::next_unanswered(&def.screening, 0, &self.local) {
                Some(index) => self.ask(def, index),
                // Every screening fact is already known; evaluate directly.
                None => self.run_screening_evaluation(def),
            }
            return;
        }
    }

    fn ask(&mut self, def: &SymptomDefinition, index: usize) {
        let list = match self.stage {
            Stage::FollowUp => &def.follow_up,
            _ => &def.screening,
        };
        let text = list[index].text.clone();
        if let Some(current) = self.current.as_mut() {
            current.question = Some(index);
        }
        self.push(TranscriptEntry::prompt(self.elapsed_ms(), text));
    }

    fn after_screening_answer(&mut self, def: &SymptomDefinition, index: usize) {
        let result = (def.evaluate_screening)(&self.local);
        self.apply_triage(&def.id, &result);
        if result.is_stop() || result.is_emergency() {
            self.complete_symptom(def);
            return;
        }
        // Branch results are only acted on at full-list evaluation; here
        // the running triage hint was merged and we keep asking.
        match question::next_unanswered(&def.screening, index + 1, &self.local) {
            Some(next) => self.ask(def, next),
            None => self.run_screening_evaluation(def),
        }
    }

    fn run_screening_evaluation(&mut self, def: &SymptomDefinition) {
        let result = (def.evaluate_screening)(&self.local);
        self.apply_triage(&def.id, &result);

        if result.is_stop() || result.is_emergency() {
            self.complete_symptom(def);
            return;
        }
        if result.action == LogicAction::Branch {
            // Screening branch is a redirect: the target runs next and
            // this symptom completes whether or not the target was new.
            self.enqueue_branch(def, result.branch_to.as_deref());
            self.complete_symptom(def);
            return;
        }
        if def.follow_up.is_empty() {
            self.complete_symptom(def);
            return;
        }

        self.stage = Stage::FollowUp;
        match question::next_unanswered(&def.follow_up, 0, &self.local) {
            Some(index) => self.ask(def, index),
            None => self.run_follow_up_evaluation(def),
        }
    }

    fn after_follow_up_answer(&mut self, def: &SymptomDefinition, index: usize) {
        match question::next_unanswered(&def.follow_up, index + 1, &self.local) {
            Some(next) => self.ask(def, next),
            None => self.run_follow_up_evaluation(def),
        }
    }

    fn run_follow_up_evaluation(&mut self, def: &SymptomDefinition) {
        let result = match def.evaluate_follow_up {
            Some(evaluate) => evaluate(&self.local),
            // Absent follow-up evaluator is a no-op continue.
            None => LogicResult::proceed(),
        };
        self.apply_triage(&def.id, &result);
        if result.action == LogicAction::Branch {
            // Follow-up branch means "also check this" — it never blocks
            // completion of the current symptom.
            self.enqueue_branch(def, result.branch_to.as_deref());
        }
        self.complete_symptom(def);
    }

    fn enqueue_branch(&mut self, def: &SymptomDefinition, target: Option<&str>) {
        let Some(target) = target else { return };
        if !def.branches_to.iter().any(|declared| declared == target) {
            // Only declared targets went through load-time validation;
            // anything else is refused here rather than trusted.
            warn!(symptom = %def.id, target = %target, "undeclared branch target ignored");
            return;
        }
        if self.visited.iter().any(|v| v == target) {
            debug!(symptom = %target, "branch target already visited");
            return;
        }
        let name = match self.catalog.get(target) {
            Some(target_def) => target_def.name.clone(),
            None => {
                warn!(symptom = %target, "branch to unknown symptom ignored");
                return;
            }
        };
        self.queue.push_front_deduped(target);
        self.push(TranscriptEntry::note(
            self.elapsed_ms(),
            format!("Also checking: {}", name),
        ));
        info!(symptom = %target, "branch queued at front");
    }

    fn apply_triage(&mut self, symptom_id: &str, result: &LogicResult) {
        let Some(level) = result.triage_level else {
            return;
        };
        self.highest = self.highest.merge(level);
        if let Some(entry) = self.results.get_mut(symptom_id) {
            *entry = entry.merge(level);
        }
        if let Some(message) = &result.triage_message {
            if level.is_escalation() {
                // Evaluators re-run as answers accumulate; a reason (and
                // its transcript echo) is recorded once per session.
                if self.reasons.record(message.clone()) {
                    self.push(TranscriptEntry::message(self.elapsed_ms(), message));
                    info!(symptom = %symptom_id, %level, reason = %message, "triage escalation");
                }
            } else {
                self.push(TranscriptEntry::message(self.elapsed_ms(), message));
            }
        }
    }

    fn complete_symptom(&mut self, def: &SymptomDefinition) {
        let level = self.results.get(&def.id).copied().unwrap_or_default();
        self.push(TranscriptEntry::symptom_end(self.elapsed_ms(), &def.id, level));
        info!(symptom = %def.id, status = level.status_label(), "symptom complete");
        self.current = None;

        if self.queue.is_empty() {
            self.stage = Stage::Complete;
            self.push(TranscriptEntry::note(
                self.elapsed_ms(),
                "Symptom check complete.",
            ));
            info!(session = %self.session_id, highest = %self.highest, "session complete");
        } else {
            // Settling delay between modules is presentation pacing; the
            // caller resumes with advance(generation).
            self.pending = Some(self.generation);
        }
    }
}

/// Static priority reorder. Only two ids are special-cased: vomiting is
/// forced ahead of nausea when both are requested; everything else keeps
/// request order.
fn reorder_priority(ids: &mut Vec<String>) {
    let nausea = ids.iter().position(|id| id == symptoms::NAUSEA);
    let vomiting = ids.iter().position(|id| id == symptoms::VOMITING);
    if let (Some(n), Some(v)) = (nausea, vomiting) {
        if v > n {
            let id = ids.remove(v);
            ids.insert(n, id);
        }
    }
}
