//! Voice intent parser.
//!
//! Maps a spoken query to one of five intents with an ordered regex table.
//! Intents are tried in a fixed priority order and the first hit wins; a
//! query that matches nothing is treated as a status check.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{IntentKind, IntentMatch, VoiceIntent};

// =============================================================================
// Compiled intent table (compiled once, reused across calls)
// =============================================================================

static INTENT_TABLE: LazyLock<Vec<(IntentKind, Vec<Regex>)>> = LazyLock::new(|| {
    let mk = |pats: &[&str]| -> Vec<Regex> {
        pats.iter()
            .map(|p| Regex::new(p).expect("Invalid intent regex"))
            .collect()
    };

    vec![
        (
            IntentKind::NextTask,
            mk(&[
                r"what('s|s| is) next",
                r"next task",
                r"what do i need to do",
                r"what('s|s| is) coming up",
            ]),
        ),
        // Before status so "done with X" is a completion, not a progress question
        (
            IntentKind::MarkComplete,
            mk(&[
                r"mark (.*) (complete|done|finished)",
                r"(complete|done|finish) (.*)",
                r"i('m| am) done with (.*)",
                r"finished (.*)",
            ]),
        ),
        (
            IntentKind::StatusCheck,
            mk(&[
                r"how are we doing",
                r"what('s|s| is) (the |our )?progress",
                r"timeline status",
                r"how much (is )?left",
            ]),
        ),
        (
            IntentKind::TimeCheck,
            mk(&[
                r"how much time",
                r"when (is |do we )?start",
                r"time until",
                r"when('s|s| is) the event",
            ]),
        ),
        (
            IntentKind::TaskList,
            mk(&[
                r"list (all )?tasks",
                r"what do we need to do",
                r"show me (the )?timeline",
                r"all tasks",
            ]),
        ),
    ]
});

/// Trim, lowercase, and fold typographic apostrophes to `'`.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

// =============================================================================
// IntentParser
// =============================================================================

/// Stateless intent parser over the shared regex table.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentParser;

impl IntentParser {
    pub fn new() -> Self {
        Self
    }

    /// Intents in the order they are tried.
    pub fn priority(&self) -> Vec<IntentKind> {
        INTENT_TABLE.iter().map(|(kind, _)| *kind).collect()
    }

    /// Parse a raw query into an intent. Never fails.
    pub fn parse(&self, query: &str) -> VoiceIntent {
        let normalized = normalize_query(query);

        for (kind, patterns) in INTENT_TABLE.iter() {
            for re in patterns {
                if let Some(caps) = re.captures(&normalized) {
                    let matched = IntentMatch {
                        text: caps
                            .get(0)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default(),
                        groups: caps
                            .iter()
                            .skip(1)
                            .map(|g| g.map(|m| m.as_str().to_string()))
                            .collect(),
                    };
                    debug!(intent = %kind, pattern = re.as_str(), "Intent matched");
                    return VoiceIntent {
                        kind: *kind,
                        query: query.to_string(),
                        matched: Some(matched),
                    };
                }
            }
        }

        debug!(query, "No intent matched, defaulting to status check");
        VoiceIntent {
            kind: IntentKind::StatusCheck,
            query: query.to_string(),
            matched: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(query: &str) -> IntentKind {
        IntentParser::new().parse(query).kind
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            IntentParser::new().priority(),
            vec![
                IntentKind::NextTask,
                IntentKind::MarkComplete,
                IntentKind::StatusCheck,
                IntentKind::TimeCheck,
                IntentKind::TaskList,
            ]
        );
    }

    #[test]
    fn test_next_task_queries() {
        assert_eq!(kind("What's next?"), IntentKind::NextTask);
        assert_eq!(kind("whats next"), IntentKind::NextTask);
        assert_eq!(kind("What is coming up"), IntentKind::NextTask);
        assert_eq!(kind("next task please"), IntentKind::NextTask);
        assert_eq!(kind("What do I need to do"), IntentKind::NextTask);
    }

    #[test]
    fn test_typographic_apostrophe_folded() {
        assert_eq!(kind("What\u{2019}s next?"), IntentKind::NextTask);
        assert_eq!(kind("I\u{2019}m done with packing"), IntentKind::MarkComplete);
    }

    #[test]
    fn test_mark_complete_captures() {
        let intent = IntentParser::new().parse("Mark soccer cleats done");
        assert_eq!(intent.kind, IntentKind::MarkComplete);
        let matched = intent.matched.unwrap();
        assert_eq!(matched.text, "mark soccer cleats done");
        assert_eq!(
            matched.groups,
            vec![Some("soccer cleats".to_string()), Some("done".to_string())]
        );
        assert_eq!(intent.query, "Mark soccer cleats done");
    }

    #[test]
    fn test_mark_complete_variants() {
        assert_eq!(kind("I am done with the uniform"), IntentKind::MarkComplete);
        assert_eq!(kind("finished dinner"), IntentKind::MarkComplete);
        assert_eq!(kind("complete packing"), IntentKind::MarkComplete);
    }

    #[test]
    fn test_status_queries() {
        assert_eq!(kind("How are we doing?"), IntentKind::StatusCheck);
        assert_eq!(kind("what's our progress"), IntentKind::StatusCheck);
        assert_eq!(kind("what is progress"), IntentKind::StatusCheck);
        assert_eq!(kind("timeline status"), IntentKind::StatusCheck);
        assert_eq!(kind("how much is left"), IntentKind::StatusCheck);
    }

    #[test]
    fn test_time_queries() {
        assert_eq!(kind("How much time do we have"), IntentKind::TimeCheck);
        assert_eq!(kind("when do we start"), IntentKind::TimeCheck);
        assert_eq!(kind("when start"), IntentKind::TimeCheck);
        assert_eq!(kind("time until practice"), IntentKind::TimeCheck);
        assert_eq!(kind("When's the event?"), IntentKind::TimeCheck);
    }

    #[test]
    fn test_task_list_queries() {
        assert_eq!(kind("List all tasks"), IntentKind::TaskList);
        assert_eq!(kind("what do we need to do"), IntentKind::TaskList);
        assert_eq!(kind("show me the timeline"), IntentKind::TaskList);
    }

    #[test]
    fn test_earlier_intent_wins() {
        // Matches both NEXT_TASK and TASK_LIST patterns
        assert_eq!(kind("what's next, list all tasks"), IntentKind::NextTask);
    }

    #[test]
    fn test_unmatched_falls_back_to_status() {
        let intent = IntentParser::new().parse("tell me a joke");
        assert_eq!(intent.kind, IntentKind::StatusCheck);
        assert!(intent.matched.is_none());

        let empty = IntentParser::new().parse("   ");
        assert_eq!(empty.kind, IntentKind::StatusCheck);
        assert!(empty.matched.is_none());
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  What\u{2019}S Next  "), "what's next");
    }
}
