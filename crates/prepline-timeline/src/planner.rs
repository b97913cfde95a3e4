//! Classify-then-generate convenience for callers with no stored timeline.

use chrono::{DateTime, Utc};
use prepline_core::{Event, PrepConfig, Timeline};

use crate::classifier::EventClassifier;
use crate::generator::TimelineGenerator;

/// Pairs a classifier with a generator built from the same configuration.
pub struct Planner {
    classifier: EventClassifier,
    generator: TimelineGenerator,
}

impl Planner {
    pub fn new(classifier: EventClassifier, generator: TimelineGenerator) -> Self {
        Self {
            classifier,
            generator,
        }
    }

    pub fn from_config(config: &PrepConfig) -> Self {
        Self::new(
            EventClassifier::from_config(config),
            TimelineGenerator::new(config.family.clone()),
        )
    }

    pub fn classifier(&self) -> &EventClassifier {
        &self.classifier
    }

    pub fn generator(&self) -> &TimelineGenerator {
        &self.generator
    }

    /// Classify `event` and generate its timeline as of `now`.
    pub fn plan(&self, event: &Event, now: DateTime<Utc>) -> Option<Timeline> {
        let classified = self.classifier.classify(event);
        self.generator.generate(event, classified.as_ref(), now)
    }
}
