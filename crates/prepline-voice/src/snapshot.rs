//! Point-in-time voice view of a timeline.
//!
//! A [`VoiceSnapshot`] is always rebuilt from the timeline, the completion set
//! and the current instant; nothing in it is cached between queries.

use chrono::{DateTime, Utc};
use prepline_core::{CompletionSet, StepType, Timeline};
use serde::Serialize;

use crate::types::IndexedStep;

/// Whole minutes from `now` until `at`, floored. Negative when `at` has passed.
pub fn minutes_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (at - now).num_seconds().div_euclid(60)
}

/// `"1 minute"`, `"5 minutes"`.
pub fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Render a minute count as "H hours and M minutes", "M minutes" or "now".
///
/// Zero components are omitted and negative input is clamped to "now".
pub fn format_time_until(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;

    match (hours, rest) {
        (0, 0) => "now".to_string(),
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} and {}", plural(h, "hour"), plural(m, "minute")),
    }
}

/// Everything the response composer needs to answer a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceSnapshot {
    pub event_title: String,
    pub event_time: DateTime<Utc>,
    pub time_until_event: String,
    pub total_tasks: usize,
    pub completed_count: usize,
    /// Steps that are not completed and are not the event start, in timeline order.
    pub incomplete: Vec<IndexedStep>,
    /// First incomplete step at or after `now`.
    pub next_step: Option<IndexedStep>,
    /// Incomplete steps whose time has passed.
    pub overdue: Vec<IndexedStep>,
    /// 0..=100.
    pub progress: u8,
}

impl VoiceSnapshot {
    pub fn build(
        timeline: &Timeline,
        event_title: &str,
        event_time: DateTime<Utc>,
        completed: &CompletionSet,
        now: DateTime<Utc>,
    ) -> Self {
        let incomplete: Vec<IndexedStep> = timeline
            .steps
            .iter()
            .enumerate()
            .filter(|(index, step)| {
                !completed.contains(*index) && step.step_type != StepType::EventStart
            })
            .map(|(index, step)| IndexedStep {
                index,
                step: step.clone(),
            })
            .collect();

        let next_step = incomplete.iter().find(|s| s.step.time >= now).cloned();
        let overdue = incomplete
            .iter()
            .filter(|s| s.step.time < now)
            .cloned()
            .collect();

        let total_tasks = timeline.len();
        let completed_count = completed.count_within(total_tasks);
        let progress =
            ((completed_count as f64 / total_tasks.max(1) as f64) * 100.0).round() as u8;

        Self {
            event_title: event_title.to_string(),
            event_time,
            time_until_event: format_time_until(minutes_until(event_time, now)),
            total_tasks,
            completed_count,
            incomplete,
            next_step,
            overdue,
            progress,
        }
    }

    /// `"in 2 hours"` or `"now"`, for "Your X starts ..." sentences.
    pub fn starts_phrase(&self) -> String {
        if self.time_until_event == "now" {
            "now".to_string()
        } else {
            format!("in {}", self.time_until_event)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use prepline_core::TimelineStep;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 5, 4, hour, minute, 0).unwrap()
    }

    fn step(time: DateTime<Utc>, activity: &str, step_type: StepType) -> TimelineStep {
        TimelineStep {
            time,
            activity: activity.into(),
            step_type,
            duration: 10,
            note: None,
        }
    }

    fn practice_timeline() -> Timeline {
        Timeline {
            steps: vec![
                step(at(14, 45), "Dog care routine", StepType::DogCare),
                step(at(15, 30), "Pack items: Soccer cleats", StepType::Preparation),
                step(at(15, 45), "Leave for Soccer Practice", StepType::Departure),
                step(at(16, 0), "Soccer Practice begins", StepType::EventStart),
            ],
            total_prep_time: 75,
            pattern_name: "sports".into(),
            confidence: 54,
        }
    }

    #[test]
    fn test_format_time_until() {
        assert_eq!(format_time_until(0), "now");
        assert_eq!(format_time_until(-30), "now");
        assert_eq!(format_time_until(1), "1 minute");
        assert_eq!(format_time_until(45), "45 minutes");
        assert_eq!(format_time_until(60), "1 hour");
        assert_eq!(format_time_until(61), "1 hour and 1 minute");
        assert_eq!(format_time_until(150), "2 hours and 30 minutes");
        assert_eq!(format_time_until(180), "3 hours");
    }

    #[test]
    fn test_minutes_until_floors() {
        let now = at(14, 0);
        assert_eq!(minutes_until(now + Duration::seconds(119), now), 1);
        assert_eq!(minutes_until(now - Duration::seconds(30), now), -1);
        assert_eq!(minutes_until(now, now), 0);
    }

    #[test]
    fn test_snapshot_before_any_step() {
        let timeline = practice_timeline();
        let snap = VoiceSnapshot::build(
            &timeline,
            "Soccer Practice",
            at(16, 0),
            &CompletionSet::new(),
            at(14, 0),
        );
        assert_eq!(snap.time_until_event, "2 hours");
        assert_eq!(snap.starts_phrase(), "in 2 hours");
        assert_eq!(snap.total_tasks, 4);
        assert_eq!(snap.incomplete.len(), 3);
        assert_eq!(snap.next_step.as_ref().unwrap().index, 0);
        assert!(snap.overdue.is_empty());
        assert_eq!(snap.progress, 0);
    }

    #[test]
    fn test_snapshot_with_overdue_and_completed() {
        let timeline = practice_timeline();
        let completed: CompletionSet = [1].into_iter().collect();
        let snap =
            VoiceSnapshot::build(&timeline, "Soccer Practice", at(16, 0), &completed, at(15, 0));

        assert_eq!(snap.completed_count, 1);
        assert_eq!(snap.progress, 25);
        assert_eq!(snap.overdue.len(), 1);
        assert_eq!(snap.overdue[0].index, 0);
        assert_eq!(snap.next_step.as_ref().unwrap().index, 2);
        assert_eq!(snap.time_until_event, "1 hour");
    }

    #[test]
    fn test_snapshot_ignores_out_of_range_completions() {
        let timeline = practice_timeline();
        let completed: CompletionSet = [0, 1, 2, 3, 17].into_iter().collect();
        let snap =
            VoiceSnapshot::build(&timeline, "Soccer Practice", at(16, 0), &completed, at(15, 0));
        assert_eq!(snap.completed_count, 4);
        assert_eq!(snap.progress, 100);
        assert!(snap.incomplete.is_empty());
        assert!(snap.next_step.is_none());
    }

    #[test]
    fn test_snapshot_after_event_start() {
        let timeline = practice_timeline();
        let snap = VoiceSnapshot::build(
            &timeline,
            "Soccer Practice",
            at(16, 0),
            &CompletionSet::new(),
            at(16, 20),
        );
        assert_eq!(snap.time_until_event, "now");
        assert_eq!(snap.starts_phrase(), "now");
        assert_eq!(snap.overdue.len(), 3);
        assert!(snap.next_step.is_none());
    }

    #[test]
    fn test_empty_timeline_progress() {
        let timeline = Timeline {
            steps: vec![],
            total_prep_time: 0,
            pattern_name: "general".into(),
            confidence: 0,
        };
        let snap =
            VoiceSnapshot::build(&timeline, "Nothing", at(16, 0), &CompletionSet::new(), at(15, 0));
        assert_eq!(snap.progress, 0);
        assert_eq!(snap.total_tasks, 0);
    }
}
