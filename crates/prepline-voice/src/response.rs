//! Response composition.
//!
//! Turns a parsed intent and a [`VoiceSnapshot`] into speakable text plus an
//! action for the calling surface. Every intent produces a response.

use chrono::{DateTime, Utc};

use crate::matcher::{task_candidate, LooseMatcher, TaskMatcher};
use crate::parser::normalize_query;
use crate::snapshot::{minutes_until, plural, VoiceSnapshot};
use crate::types::{IntentKind, VoiceAction, VoiceIntent, VoiceResponse};

/// Upcoming steps read aloud for a task list.
const SPOKEN_TASKS: usize = 3;
/// Upcoming steps attached to a `show_task_list` action.
const LISTED_TASKS: usize = 5;

// =============================================================================
// ResponseComposer
// =============================================================================

/// Composes voice responses.
pub struct ResponseComposer {
    matcher: Box<dyn TaskMatcher>,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(Box::new(LooseMatcher))
    }
}

impl ResponseComposer {
    pub fn new(matcher: Box<dyn TaskMatcher>) -> Self {
        Self { matcher }
    }

    /// Build the response for `intent` against `snapshot` as of `now`.
    pub fn compose(
        &self,
        intent: &VoiceIntent,
        snapshot: &VoiceSnapshot,
        now: DateTime<Utc>,
    ) -> VoiceResponse {
        match intent.kind {
            IntentKind::NextTask => self.next_task(snapshot, now),
            IntentKind::StatusCheck => self.status(snapshot),
            IntentKind::TimeCheck => self.time_check(snapshot),
            IntentKind::TaskList => self.task_list(snapshot, now),
            IntentKind::MarkComplete => self.mark_complete(&intent.query, snapshot),
        }
    }

    /// Generic answer naming the start time and the next task.
    pub fn summary(&self, snapshot: &VoiceSnapshot) -> VoiceResponse {
        VoiceResponse {
            text: format!(
                "I understand you're asking about your timeline. Your {} starts {}. {}",
                snapshot.event_title,
                snapshot.starts_phrase(),
                next_or_done(snapshot)
            ),
            action: show_timeline(snapshot),
        }
    }

    fn next_task(&self, snapshot: &VoiceSnapshot, now: DateTime<Utc>) -> VoiceResponse {
        match &snapshot.next_step {
            Some(next) => {
                let minutes = minutes_until(next.step.time, now);
                let timing = if minutes > 0 {
                    format!("in {}", plural(minutes, "minute"))
                } else {
                    "now".to_string()
                };
                let text = format!(
                    "Your next task is {} {}. {}",
                    next.step.activity,
                    timing,
                    next.step.note.as_deref().unwrap_or("")
                );
                VoiceResponse {
                    text: text.trim().to_string(),
                    action: VoiceAction::ShowNextTask {
                        task_index: next.index,
                    },
                }
            }
            None => VoiceResponse {
                text: all_complete(snapshot),
                action: show_progress(snapshot),
            },
        }
    }

    fn status(&self, snapshot: &VoiceSnapshot) -> VoiceResponse {
        let mut text = format!(
            "You've completed {} out of {}. That's {}% done.",
            snapshot.completed_count,
            plural(snapshot.total_tasks as i64, "task"),
            snapshot.progress
        );

        if !snapshot.overdue.is_empty() {
            text.push_str(&format!(
                " You have {}.",
                plural(snapshot.overdue.len() as i64, "overdue task")
            ));
        }

        match &snapshot.next_step {
            Some(next) => text.push_str(&format!(" Your next task is {}.", next.step.activity)),
            None => text.push_str(&format!(
                " Your {} starts {}.",
                snapshot.event_title,
                snapshot.starts_phrase()
            )),
        }

        VoiceResponse {
            text,
            action: show_progress(snapshot),
        }
    }

    fn time_check(&self, snapshot: &VoiceSnapshot) -> VoiceResponse {
        VoiceResponse {
            text: format!(
                "Your {} starts {}. {}",
                snapshot.event_title,
                snapshot.starts_phrase(),
                next_or_done(snapshot)
            ),
            action: show_timeline(snapshot),
        }
    }

    fn task_list(&self, snapshot: &VoiceSnapshot, now: DateTime<Utc>) -> VoiceResponse {
        if snapshot.incomplete.is_empty() {
            return VoiceResponse {
                text: all_complete(snapshot),
                action: VoiceAction::ShowCompleted,
            };
        }

        let spoken: Vec<String> = snapshot
            .incomplete
            .iter()
            .take(SPOKEN_TASKS)
            .enumerate()
            .map(|(position, s)| {
                let minutes = minutes_until(s.step.time, now);
                let timing = match minutes {
                    m if m > 0 => format!("in {}", plural(m, "minute")),
                    0 => "now".to_string(),
                    _ => "overdue".to_string(),
                };
                format!("{}: {} {}", position + 1, s.step.activity, timing)
            })
            .collect();

        let mut text = format!("Here are your upcoming tasks: {}.", spoken.join(". "));
        let remaining = snapshot.incomplete.len().saturating_sub(SPOKEN_TASKS);
        if remaining > 0 {
            text.push_str(&format!(" And {} more.", plural(remaining as i64, "task")));
        }

        VoiceResponse {
            text,
            action: VoiceAction::ShowTaskList {
                tasks: snapshot
                    .incomplete
                    .iter()
                    .take(LISTED_TASKS)
                    .cloned()
                    .collect(),
            },
        }
    }

    fn mark_complete(&self, query: &str, snapshot: &VoiceSnapshot) -> VoiceResponse {
        let candidate = task_candidate(query);

        match self.matcher.match_task(&candidate, &snapshot.incomplete) {
            Some(step) => VoiceResponse {
                text: format!("I'll mark \"{}\" as complete for you.", step.step.activity),
                action: VoiceAction::MarkComplete {
                    index: step.index,
                    name: step.step.activity.clone(),
                },
            },
            None => {
                let shown = if candidate.is_empty() {
                    normalize_query(query)
                } else {
                    candidate
                };
                VoiceResponse {
                    text: format!(
                        "I couldn't find a task matching \"{shown}\". Can you be more specific?"
                    ),
                    action: VoiceAction::ClarifyTask { query: shown },
                }
            }
        }
    }
}

// =============================================================================
// Shared fragments
// =============================================================================

fn all_complete(snapshot: &VoiceSnapshot) -> String {
    format!(
        "All tasks are complete! Your {} starts {}.",
        snapshot.event_title,
        snapshot.starts_phrase()
    )
}

fn next_or_done(snapshot: &VoiceSnapshot) -> String {
    match &snapshot.next_step {
        Some(next) => format!("Your next task is {}.", next.step.activity),
        None => "All tasks are complete!".to_string(),
    }
}

fn show_progress(snapshot: &VoiceSnapshot) -> VoiceAction {
    VoiceAction::ShowProgress {
        progress: snapshot.progress,
        overdue_count: snapshot.overdue.len(),
    }
}

fn show_timeline(snapshot: &VoiceSnapshot) -> VoiceAction {
    VoiceAction::ShowTimeline {
        time_until_event: snapshot.time_until_event.clone(),
        event_title: snapshot.event_title.clone(),
    }
}

// =============================================================================
// Tests
// =============================================================================
