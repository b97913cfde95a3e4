//! Voice-facing types: intents, indexed steps, actions and responses.

use std::fmt;

use prepline_core::TimelineStep;
use serde::{Deserialize, Serialize};

// =============================================================================
// Intents
// =============================================================================

/// What a voice query is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentKind {
    NextTask,
    MarkComplete,
    StatusCheck,
    TimeCheck,
    TaskList,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentKind::NextTask => write!(f, "NEXT_TASK"),
            IntentKind::MarkComplete => write!(f, "MARK_COMPLETE"),
            IntentKind::StatusCheck => write!(f, "STATUS_CHECK"),
            IntentKind::TimeCheck => write!(f, "TIME_CHECK"),
            IntentKind::TaskList => write!(f, "TASK_LIST"),
        }
    }
}

/// The regex match that selected an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentMatch {
    /// Whole matched text.
    pub text: String,
    /// Capture groups after the whole match; `None` for groups that did not participate.
    pub groups: Vec<Option<String>>,
}

/// A parsed voice query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceIntent {
    pub kind: IntentKind,
    /// The query as spoken, before normalization.
    pub query: String,
    /// `None` when no pattern matched and the parser fell back to a status check.
    pub matched: Option<IntentMatch>,
}

// =============================================================================
// Steps
// =============================================================================

/// A timeline step together with its position in the stored timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedStep {
    pub index: usize,
    #[serde(flatten)]
    pub step: TimelineStep,
}

// =============================================================================
// Actions and responses
// =============================================================================

/// What the calling surface should do with a response.
///
/// Serialized as `{"action": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum VoiceAction {
    ShowNextTask {
        task_index: usize,
    },
    ShowProgress {
        progress: u8,
        overdue_count: usize,
    },
    ShowTimeline {
        time_until_event: String,
        event_title: String,
    },
    /// At most five upcoming steps.
    ShowTaskList {
        tasks: Vec<IndexedStep>,
    },
    ShowCompleted,
    /// The caller should add `index` to the event's completion set.
    MarkComplete {
        index: usize,
        name: String,
    },
    ClarifyTask {
        query: String,
    },
}

impl VoiceAction {
    pub fn name(&self) -> &'static str {
        match self {
            VoiceAction::ShowNextTask { .. } => "show_next_task",
            VoiceAction::ShowProgress { .. } => "show_progress",
            VoiceAction::ShowTimeline { .. } => "show_timeline",
            VoiceAction::ShowTaskList { .. } => "show_task_list",
            VoiceAction::ShowCompleted => "show_completed",
            VoiceAction::MarkComplete { .. } => "mark_complete",
            VoiceAction::ClarifyTask { .. } => "clarify_task",
        }
    }
}

impl fmt::Display for VoiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Speakable text plus the action the caller should take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceResponse {
    pub text: String,
    #[serde(flatten)]
    pub action: VoiceAction,
}
