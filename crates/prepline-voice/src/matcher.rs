//! Resolving "mark X done" to a concrete timeline step.

use regex::Regex;
use std::sync::LazyLock;

use crate::parser::normalize_query;
use crate::types::IndexedStep;

static FILLER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:mark|complete|done|finished|i'm|i am|with)\b").expect("Invalid filler regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Strip completion filler words from a query, leaving the task description.
///
/// `"Mark soccer cleats done"` becomes `"soccer cleats"`. Only whole words
/// are removed, so `"marker"` survives.
pub fn task_candidate(query: &str) -> String {
    let normalized = normalize_query(query);
    let stripped = FILLER_WORDS.replace_all(&normalized, " ");
    WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Picks the step a completion request refers to.
pub trait TaskMatcher: Send + Sync {
    /// Return the first of `steps` that matches `candidate`, if any.
    ///
    /// `candidate` is already lowercased and stripped of filler words.
    fn match_task<'a>(&self, candidate: &str, steps: &'a [IndexedStep]) -> Option<&'a IndexedStep>;
}

/// Substring matching in either direction.
///
/// A step matches when its activity contains the candidate, or when the
/// candidate contains the activity's first word.
#[derive(Debug, Default, Clone, Copy)]
pub struct LooseMatcher;

impl TaskMatcher for LooseMatcher {
    fn match_task<'a>(&self, candidate: &str, steps: &'a [IndexedStep]) -> Option<&'a IndexedStep> {
        if candidate.is_empty() {
            return None;
        }

        steps.iter().find(|s| {
            let activity = s.step.activity.to_lowercase();
            activity.contains(candidate)
                || activity
                    .split_whitespace()
                    .next()
                    .is_some_and(|first| candidate.contains(first))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prepline_core::{StepType, TimelineStep};

    fn indexed(index: usize, activity: &str) -> IndexedStep {
        IndexedStep {
            index,
            step: TimelineStep {
                time: Utc.with_ymd_and_hms(2030, 5, 4, 15, 0, 0).unwrap(),
                activity: activity.into(),
                step_type: StepType::Preparation,
                duration: 10,
                note: None,
            },
        }
    }

    #[test]
    fn test_task_candidate_strips_filler() {
        assert_eq!(task_candidate("Mark soccer cleats done"), "soccer cleats");
        assert_eq!(task_candidate("I'm done with the dog"), "the dog");
        assert_eq!(task_candidate("I\u{2019}m done with packing"), "packing");
        assert_eq!(task_candidate("finished dinner"), "dinner");
    }

    #[test]
    fn test_filler_stripped_as_whole_words_not_substrings() {
        // "markers" and "completed" survive; a raw substring strip would mangle them.
        assert_eq!(task_candidate("mark markers done"), "markers");
        assert_eq!(task_candidate("completed homework"), "completed homework");
    }

    #[test]
    fn test_task_candidate_all_filler() {
        assert_eq!(task_candidate("mark complete"), "");
        assert_eq!(task_candidate("  done  "), "");
    }

    #[test]
    fn test_match_by_containment() {
        let steps = vec![
            indexed(0, "Dog care routine (let out, feed if needed)"),
            indexed(1, "Pack items: Soccer cleats, Shin guards, Water bottle"),
        ];
        let hit = LooseMatcher.match_task("soccer cleats", &steps).unwrap();
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_match_by_first_word() {
        let steps = vec![
            indexed(2, "Leave for Soccer Practice"),
            indexed(3, "Dinner (eat before leaving)"),
        ];
        let hit = LooseMatcher.match_task("the dinner thing", &steps).unwrap();
        assert_eq!(hit.index, 3);
    }

    #[test]
    fn test_first_match_wins() {
        let steps = vec![indexed(0, "Pack bag"), indexed(1, "Pack snacks")];
        assert_eq!(LooseMatcher.match_task("pack", &steps).unwrap().index, 0);
    }

    #[test]
    fn test_no_match() {
        let steps = vec![indexed(0, "Leave for practice")];
        assert!(LooseMatcher.match_task("homework", &steps).is_none());
        assert!(LooseMatcher.match_task("", &steps).is_none());
    }

    #[test]
    fn test_blank_activity_never_matches_by_first_word() {
        let steps = vec![indexed(0, "   ")];
        assert!(LooseMatcher.match_task("anything", &steps).is_none());
    }
}
