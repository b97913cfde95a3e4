//! Event-type classification.
//!
//! Matches an event's title and description against the configured pattern
//! catalog using plain substring search. Which matching pattern wins is
//! decided by a pluggable [`PatternSelector`].

use std::collections::HashSet;

use prepline_core::{ClassifiedPattern, Event, EventPattern, PrepConfig, SelectionStrategy};
use tracing::{debug, info};

/// Bonus applied when a matched keyword also appears as a standalone word.
const WHOLE_WORD_BONUS: f64 = 25.0;

// =============================================================================
// Scoring
// =============================================================================

/// Lowercased haystack of an event's title and description.
pub fn search_text(event: &Event) -> String {
    format!(
        "{} {}",
        event.title,
        event.description.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

/// Keywords of `pattern` found anywhere in `text` (which must be lowercase).
pub fn keyword_hits<'a>(text: &str, pattern: &'a EventPattern) -> Vec<&'a str> {
    pattern
        .keywords
        .iter()
        .filter(|k| text.contains(k.to_lowercase().as_str()))
        .map(|k| k.as_str())
        .collect()
}

/// Confidence in `0..=100` that `pattern` describes `text`.
///
/// The share of the pattern's keywords found in the text, plus a fixed bonus
/// when any hit also stands alone as a whitespace-delimited token.
pub fn confidence(text: &str, pattern: &EventPattern) -> u8 {
    if pattern.keywords.is_empty() {
        return 0;
    }

    let hits = keyword_hits(text, pattern);
    let mut score = hits.len() as f64 / pattern.keywords.len() as f64 * 100.0;

    let tokens: HashSet<&str> = text.split_whitespace().collect();
    if hits
        .iter()
        .any(|k| tokens.contains(k.to_lowercase().as_str()))
    {
        score = (score + WHOLE_WORD_BONUS).min(100.0);
    }

    score.round().clamp(0.0, 100.0) as u8
}

// =============================================================================
// Selection strategies
// =============================================================================

/// Chooses a pattern for a lowercased event text.
pub trait PatternSelector: Send + Sync {
    fn classify(&self, text: &str, patterns: &[EventPattern]) -> Option<ClassifiedPattern>;
}

/// Picks the first pattern, in declaration order, with any keyword hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl PatternSelector for FirstMatch {
    fn classify(&self, text: &str, patterns: &[EventPattern]) -> Option<ClassifiedPattern> {
        patterns
            .iter()
            .find(|p| !keyword_hits(text, p).is_empty())
            .map(|p| ClassifiedPattern {
                pattern: p.clone(),
                confidence: confidence(text, p),
            })
    }
}

/// Scores every pattern with a hit and picks the best; ties go to the earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestConfidence;

impl PatternSelector for HighestConfidence {
    fn classify(&self, text: &str, patterns: &[EventPattern]) -> Option<ClassifiedPattern> {
        let mut best: Option<(&EventPattern, u8)> = None;
        for p in patterns {
            if keyword_hits(text, p).is_empty() {
                continue;
            }
            let score = confidence(text, p);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((p, score));
            }
        }
        best.map(|(p, confidence)| ClassifiedPattern {
            pattern: p.clone(),
            confidence,
        })
    }
}

// =============================================================================
// EventClassifier
// =============================================================================

/// Classifies events against a fixed pattern catalog.
pub struct EventClassifier {
    patterns: Vec<EventPattern>,
    selector: Box<dyn PatternSelector>,
}

impl EventClassifier {
    pub fn new(patterns: Vec<EventPattern>, selector: Box<dyn PatternSelector>) -> Self {
        Self { patterns, selector }
    }

    pub fn with_strategy(patterns: Vec<EventPattern>, strategy: SelectionStrategy) -> Self {
        let selector: Box<dyn PatternSelector> = match strategy {
            SelectionStrategy::FirstMatch => Box::new(FirstMatch),
            SelectionStrategy::HighestConfidence => Box::new(HighestConfidence),
        };
        Self::new(patterns, selector)
    }

    pub fn from_config(config: &PrepConfig) -> Self {
        Self::with_strategy(config.patterns.clone(), config.classifier.selection)
    }

    pub fn patterns(&self) -> &[EventPattern] {
        &self.patterns
    }

    /// Classify an event. `None` means no pattern matched and generic
    /// defaults apply.
    pub fn classify(&self, event: &Event) -> Option<ClassifiedPattern> {
        let text = search_text(event);
        let result = self.selector.classify(&text, &self.patterns);
        match &result {
            Some(c) => info!(
                event_id = %event.id,
                pattern = %c.pattern.name,
                confidence = c.confidence,
                "Event classified"
            ),
            None => debug!(event_id = %event.id, "No event pattern matched"),
        }
        result
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prepline_core::catalog::default_patterns;

    fn event(title: &str) -> Event {
        Event::new(title, Utc.with_ymd_and_hms(2030, 5, 4, 16, 0, 0).unwrap())
    }

    fn first_match() -> EventClassifier {
        EventClassifier::with_strategy(default_patterns(), SelectionStrategy::FirstMatch)
    }

    #[test]
    fn test_search_text_includes_description() {
        let e = event("Den Meeting").with_description("Bring HANDBOOK");
        assert_eq!(search_text(&e), "den meeting bring handbook");
    }

    #[test]
    fn test_soccer_practice_is_sports() {
        let c = first_match().classify(&event("Soccer Practice")).unwrap();
        assert_eq!(c.pattern.name, "sports");
        // 2 of 7 keywords, plus the whole-word bonus.
        assert_eq!(c.confidence, 54);
    }

    #[test]
    fn test_zoom_is_online_meeting() {
        let c = first_match().classify(&event("Team Zoom Sync")).unwrap();
        assert_eq!(c.pattern.name, "online_meeting");
        assert!(c.pattern.is_virtual());
        assert_eq!(c.confidence, 36);
    }

    #[test]
    fn test_first_match_respects_declaration_order() {
        // "meeting" is a keyword of both school and work_meeting.
        let c = first_match().classify(&event("Budget meeting")).unwrap();
        assert_eq!(c.pattern.name, "school");
    }

    #[test]
    fn test_highest_confidence_can_pick_later_pattern() {
        let classifier =
            EventClassifier::with_strategy(default_patterns(), SelectionStrategy::HighestConfidence);
        let c = classifier.classify(&event("Team Zoom Sync")).unwrap();
        assert_eq!(c.pattern.name, "work_meeting");
        assert_eq!(c.confidence, 42);
    }

    #[test]
    fn test_no_match_returns_none() {
        assert!(first_match().classify(&event("Grocery run")).is_none());
    }

    #[test]
    fn test_substring_false_positive_is_accepted() {
        let c = first_match().classify(&event("Soccermania")).unwrap();
        assert_eq!(c.pattern.name, "sports");
        // Hit but not a whole word: no bonus.
        assert_eq!(c.confidence, 14);
    }

    #[test]
    fn test_confidence_is_capped() {
        let pattern = EventPattern {
            name: "solo".into(),
            keywords: vec!["swim".into()],
            preparation_time: 10,
            needs_uniform: false,
            meal: None,
            packing_list: vec![],
            attendance: Default::default(),
        };
        assert_eq!(confidence("swim lesson", &pattern), 100);
        assert_eq!(confidence("swimming", &pattern), 100);
        assert_eq!(confidence("run", &pattern), 0);
    }

    #[test]
    fn test_confidence_always_bounded() {
        let titles = [
            "Scout troop den meeting",
            "soccer football baseball basketball practice game tournament",
            "zoom teams meet webinar virtual online remote video call",
            "doctor",
            "",
        ];
        for title in titles {
            let text = title.to_lowercase();
            for p in default_patterns() {
                assert!(confidence(&text, &p) <= 100);
            }
        }
    }

    #[test]
    fn test_custom_selector_is_pluggable() {
        struct Never;
        impl PatternSelector for Never {
            fn classify(&self, _: &str, _: &[EventPattern]) -> Option<ClassifiedPattern> {
                None
            }
        }
        let classifier = EventClassifier::new(default_patterns(), Box::new(Never));
        assert!(classifier.classify(&event("Soccer Practice")).is_none());
        assert_eq!(classifier.patterns().len(), 7);
    }
}
