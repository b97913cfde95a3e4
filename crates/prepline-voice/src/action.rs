//! Executing the actions returned with voice responses.
//!
//! The composer only *suggests* a completion; [`apply_action`] performs it
//! against a completion set, and [`CompletionLedger`] does the same for many
//! events behind a lock.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use prepline_core::CompletionSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::VoiceError;
use crate::types::VoiceAction;

/// Who is recorded as making completions through the voice surface.
pub const VOICE_ACTOR: &str = "voice-assistant";

/// Change notification for a completed step, for callers that broadcast updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUpdate {
    pub event_id: Uuid,
    pub task_index: usize,
    pub completed: bool,
    pub updated_by: String,
}

/// Result of executing one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: &'static str,
    pub message: String,
    /// Present only when a step was marked complete.
    pub update: Option<CompletionUpdate>,
}

/// Execute `action` for `event_id` against `completions`.
///
/// Marking a step complete is an idempotent union; repeating it leaves the
/// set unchanged. Display actions only produce an acknowledgement.
pub fn apply_action(
    event_id: Uuid,
    action: &VoiceAction,
    completions: &mut CompletionSet,
    step_count: usize,
) -> Result<ActionOutcome, VoiceError> {
    let (message, update) = match action {
        VoiceAction::MarkComplete { index, name } => {
            if *index >= step_count {
                return Err(VoiceError::StepOutOfRange {
                    index: *index,
                    step_count,
                });
            }
            let added = completions.insert(*index);
            info!(%event_id, index, added, "Step marked complete");
            (
                format!("Marked \"{name}\" as complete"),
                Some(CompletionUpdate {
                    event_id,
                    task_index: *index,
                    completed: true,
                    updated_by: VOICE_ACTOR.to_string(),
                }),
            )
        }
        VoiceAction::ShowNextTask { .. } => ("Displaying next task".to_string(), None),
        VoiceAction::ShowProgress { .. } => ("Displaying progress".to_string(), None),
        VoiceAction::ShowTimeline { .. } => ("Displaying timeline".to_string(), None),
        VoiceAction::ShowTaskList { .. } => ("Displaying task list".to_string(), None),
        VoiceAction::ShowCompleted => ("Displaying completed tasks".to_string(), None),
        VoiceAction::ClarifyTask { .. } => (
            "Please provide more specific task information".to_string(),
            None,
        ),
    };

    debug!(%event_id, action = %action, "Action applied");
    Ok(ActionOutcome {
        action: action.name(),
        message,
        update,
    })
}

// =============================================================================
// CompletionLedger
// =============================================================================

/// In-memory completion sets keyed by event id.
///
/// Every mutation happens under one lock, so concurrent completions of
/// different steps on the same event are never lost.
#[derive(Debug, Default)]
pub struct CompletionLedger {
    sets: Mutex<HashMap<Uuid, CompletionSet>>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge previously persisted completions for `event_id`.
    pub fn load(&self, event_id: Uuid, completions: &CompletionSet) {
        let mut sets = self.sets.lock().unwrap_or_else(PoisonError::into_inner);
        sets.entry(event_id).or_default().union_with(completions);
    }

    /// Copy of the current completion set for `event_id` (empty if unknown).
    pub fn get(&self, event_id: Uuid) -> CompletionSet {
        let sets = self.sets.lock().unwrap_or_else(PoisonError::into_inner);
        sets.get(&event_id).cloned().unwrap_or_default()
    }

    /// Mark one step complete and return the resulting set.
    pub fn mark_complete(
        &self,
        event_id: Uuid,
        index: usize,
        step_count: usize,
    ) -> Result<CompletionSet, VoiceError> {
        if index >= step_count {
            return Err(VoiceError::StepOutOfRange { index, step_count });
        }
        let mut sets = self.sets.lock().unwrap_or_else(PoisonError::into_inner);
        let set = sets.entry(event_id).or_default();
        set.insert(index);
        Ok(set.clone())
    }

    /// [`apply_action`] against the ledger's set for `event_id`.
    pub fn apply(
        &self,
        event_id: Uuid,
        action: &VoiceAction,
        step_count: usize,
    ) -> Result<ActionOutcome, VoiceError> {
        let mut sets = self.sets.lock().unwrap_or_else(PoisonError::into_inner);
        let set = sets.entry(event_id).or_default();
        apply_action(event_id, action, set, step_count)
    }

    /// Number of events with a completion set.
    pub fn len(&self) -> usize {
        self.sets.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
