//! Preparation timelines for family events.
//!
//! Classifies an event against the pattern catalog and works backwards from
//! its start time to produce ordered, time-anchored preparation steps.

pub mod classifier;
pub mod generator;
pub mod planner;

pub use classifier::{EventClassifier, FirstMatch, HighestConfidence, PatternSelector};
pub use generator::{MealRule, TimelineGenerator};
pub use planner::Planner;
