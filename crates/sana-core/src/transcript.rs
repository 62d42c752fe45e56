//! Transcript event model for the interview conversation.
//!
//! Single source of truth for what the presentation layer renders:
//! bot prompts, patient answers and system status markers, in order.

use crate::severity::TriageLevel;
use serde::{Deserialize, Serialize};

/// Who is speaking in a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The triage bot
    Bot,
    /// The patient
    You,
    /// Status markers (module begin/end, skips)
    System,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Bot => write!(f, "bot"),
            Speaker::You => write!(f, "you"),
            Speaker::System => write!(f, "system"),
        }
    }
}

/// Kind of transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// A question surfaced to the patient
    Prompt { text: String },
    /// The patient's answer, echoed verbatim
    Answer { text: String },
    /// A bot remark (triage messages, reassurance)
    Message { text: String },
    /// A symptom module is starting
    SymptomStart { symptom_id: String, name: String },
    /// A symptom module finished, with its final status
    SymptomEnd {
        symptom_id: String,
        status: String,
        level: TriageLevel,
    },
    /// Informational marker (skips, queue notes)
    Note { text: String },
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Elapsed time since the session started (ms)
    pub elapsed_ms: u64,
    pub speaker: Speaker,
    pub kind: EntryKind,
}

impl TranscriptEntry {
    pub fn prompt(elapsed_ms: u64, text: impl Into<String>) -> Self {
        Self {
            elapsed_ms,
            speaker: Speaker::Bot,
            kind: EntryKind::Prompt { text: text.into() },
        }
    }

    pub fn answer(elapsed_ms: u64, text: impl Into<String>) -> Self {
        Self {
            elapsed_ms,
            speaker: Speaker::You,
            kind: EntryKind::Answer { text: text.into() },
        }
    }

    pub fn message(elapsed_ms: u64, text: impl Into<String>) -> Self {
        Self {
            elapsed_ms,
            speaker: Speaker::Bot,
            kind: EntryKind::Message { text: text.into() },
        }
    }

    pub fn symptom_start(
        elapsed_ms: u64,
        symptom_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            elapsed_ms,
            speaker: Speaker::System,
            kind: EntryKind::SymptomStart {
                symptom_id: symptom_id.into(),
                name: name.into(),
            },
        }
    }

    pub fn symptom_end(elapsed_ms: u64, symptom_id: impl Into<String>, level: TriageLevel) -> Self {
        Self {
            elapsed_ms,
            speaker: Speaker::System,
            kind: EntryKind::SymptomEnd {
                symptom_id: symptom_id.into(),
                status: level.status_label().to_string(),
                level,
            },
        }
    }

    pub fn note(elapsed_ms: u64, text: impl Into<String>) -> Self {
        Self {
            elapsed_ms,
            speaker: Speaker::System,
            kind: EntryKind::Note { text: text.into() },
        }
    }
}

/// Ordered log of conversational turns for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_end_carries_status_label() {
        let entry = TranscriptEntry::symptom_end(120, "FEV-202", TriageLevel::NotifyCareTeam);
        match entry.kind {
            EntryKind::SymptomEnd { status, level, .. } => {
                assert_eq!(status, "Alert");
                assert_eq!(level, TriageLevel::NotifyCareTeam);
            }
            _ => panic!("wrong entry kind"),
        }
    }

    #[test]
    fn test_entries_keep_order() {
        let mut t = Transcript::new();
        t.push(TranscriptEntry::prompt(0, "First?"));
        t.push(TranscriptEntry::answer(10, "Yes"));
        assert_eq!(t.len(), 2);
        assert!(matches!(t.entries[0].kind, EntryKind::Prompt { .. }));
        assert!(matches!(t.last().unwrap().kind, EntryKind::Answer { .. }));
    }
}
