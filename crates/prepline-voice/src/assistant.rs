//! Single entry point for answering voice queries about an event.

use chrono::{DateTime, Utc};
use prepline_core::{CompletionSet, Event, Timeline};
use serde::Serialize;
use tracing::info;

use crate::parser::IntentParser;
use crate::response::ResponseComposer;
use crate::snapshot::VoiceSnapshot;
use crate::types::{VoiceIntent, VoiceResponse};

/// Everything produced while answering one query.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceReply {
    pub intent: VoiceIntent,
    pub response: VoiceResponse,
    pub snapshot: VoiceSnapshot,
}

/// Parses a query, snapshots the timeline and composes the answer.
#[derive(Default)]
pub struct VoiceAssistant {
    parser: IntentParser,
    composer: ResponseComposer,
}

impl VoiceAssistant {
    pub fn new(composer: ResponseComposer) -> Self {
        Self {
            parser: IntentParser::new(),
            composer,
        }
    }

    pub fn answer(
        &self,
        query: &str,
        event: &Event,
        timeline: &Timeline,
        completions: &CompletionSet,
        now: DateTime<Utc>,
    ) -> VoiceReply {
        let intent = self.parser.parse(query);
        let snapshot = self.snapshot(event, timeline, completions, now);
        let response = self.composer.compose(&intent, &snapshot, now);

        info!(
            event_id = %event.id,
            query,
            intent = %intent.kind,
            action = %response.action,
            "Voice query answered"
        );

        VoiceReply {
            intent,
            response,
            snapshot,
        }
    }

    /// Generic status answer, used when there is no query to parse.
    pub fn summarize(
        &self,
        event: &Event,
        timeline: &Timeline,
        completions: &CompletionSet,
        now: DateTime<Utc>,
    ) -> VoiceResponse {
        let snapshot = self.snapshot(event, timeline, completions, now);
        self.composer.summary(&snapshot)
    }

    /// Snapshot for `event`. The event start falls back to the timeline's
    /// final step, then to `now`.
    pub fn snapshot(
        &self,
        event: &Event,
        timeline: &Timeline,
        completions: &CompletionSet,
        now: DateTime<Utc>,
    ) -> VoiceSnapshot {
        let event_time = event
            .start_time
            .or_else(|| timeline.event_start().map(|s| s.time))
            .unwrap_or(now);
        VoiceSnapshot::build(timeline, &event.title, event_time, completions, now)
    }
}
