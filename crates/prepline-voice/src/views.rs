//! Read-only timeline views for voice surfaces.
//!
//! The simple view is what a smart speaker reads back; the detailed view
//! carries every step with a speakable variant of its activity.

use chrono::{DateTime, Utc};
use prepline_core::{CompletionSet, Event, StepType, Timeline, TimelineStep};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::snapshot::{minutes_until, VoiceSnapshot};

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid punctuation regex"));

/// Activity text with punctuation removed, for text-to-speech.
pub fn voice_friendly(activity: &str) -> String {
    PUNCTUATION.replace_all(activity, "").into_owned()
}

// =============================================================================
// Simple view
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextTaskView {
    pub activity: String,
    /// Minutes from now; negative once the step time has passed.
    pub time_until: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleVoiceView {
    pub event_title: String,
    pub time_until_event: String,
    /// e.g. "40% complete".
    pub progress: String,
    pub next_task: Option<NextTaskView>,
    /// e.g. "2 of 5 tasks completed".
    pub summary: String,
}

impl SimpleVoiceView {
    pub fn from_snapshot(snapshot: &VoiceSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            event_title: snapshot.event_title.clone(),
            time_until_event: snapshot.time_until_event.clone(),
            progress: format!("{}% complete", snapshot.progress),
            next_task: snapshot.next_step.as_ref().map(|next| NextTaskView {
                activity: next.step.activity.clone(),
                time_until: minutes_until(next.step.time, now),
            }),
            summary: format!(
                "{} of {} tasks completed",
                snapshot.completed_count, snapshot.total_tasks
            ),
        }
    }
}

// =============================================================================
// Detailed view
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    pub start_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub index: usize,
    pub activity: String,
    pub time: DateTime<Utc>,
    pub duration: u32,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub completed: bool,
    pub voice_friendly: String,
    pub time_until: i64,
}

impl TaskView {
    fn new(index: usize, step: &TimelineStep, completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            index,
            activity: step.activity.clone(),
            time: step.time,
            duration: step.duration,
            step_type: step.step_type,
            completed,
            voice_friendly: voice_friendly(&step.activity),
            time_until: minutes_until(step.time, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineView {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub progress: u8,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedVoiceView {
    pub event: EventView,
    pub timeline: TimelineView,
}

impl DetailedVoiceView {
    pub fn build(
        event: &Event,
        timeline: &Timeline,
        completions: &CompletionSet,
        now: DateTime<Utc>,
    ) -> Self {
        let total = timeline.len();
        let completed = completions.count_within(total);
        let progress = ((completed as f64 / total.max(1) as f64) * 100.0).round() as u8;

        Self {
            event: EventView {
                id: event.id,
                title: event.title.clone(),
                start_time: event.start_time,
                location: event.location.clone(),
            },
            timeline: TimelineView {
                total,
                completed,
                remaining: total - completed,
                progress,
                tasks: timeline
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(index, step)| TaskView::new(index, step, completions.contains(index), now))
                    .collect(),
            },
        }
    }
}
