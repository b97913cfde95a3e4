use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// The kind of a preparation step on a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    DogCare,
    Preparation,
    Departure,
    Meal,
    TechCheck,
    WorkspaceSetup,
    DocumentReview,
    Refresh,
    /// Terminal step anchored at the event's start time.
    EventStart,
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepType::DogCare => write!(f, "dog_care"),
            StepType::Preparation => write!(f, "preparation"),
            StepType::Departure => write!(f, "departure"),
            StepType::Meal => write!(f, "meal"),
            StepType::TechCheck => write!(f, "tech_check"),
            StepType::WorkspaceSetup => write!(f, "workspace_setup"),
            StepType::DocumentReview => write!(f, "document_review"),
            StepType::Refresh => write!(f, "refresh"),
            StepType::EventStart => write!(f, "event_start"),
        }
    }
}

impl std::str::FromStr for StepType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dog_care" => Ok(StepType::DogCare),
            "preparation" => Ok(StepType::Preparation),
            "departure" => Ok(StepType::Departure),
            "meal" => Ok(StepType::Meal),
            "tech_check" => Ok(StepType::TechCheck),
            "workspace_setup" => Ok(StepType::WorkspaceSetup),
            "document_review" => Ok(StepType::DocumentReview),
            "refresh" => Ok(StepType::Refresh),
            "event_start" => Ok(StepType::EventStart),
            _ => Err(format!("Unknown step type: {}", s)),
        }
    }
}

/// How an event is attended.
///
/// Virtual events replace commute and pet-care steps with tech-readiness steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Attendance {
    #[default]
    InPerson,
    Virtual(VirtualPrep),
}

/// Extra preparation for a virtual event, in minutes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualPrep {
    /// Tidy the visible background and close distractions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_setup: Option<u32>,
    /// Review agenda and materials; the value is the step duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_review: Option<u32>,
}

// =============================================================================
// Event patterns
// =============================================================================

/// Meal timing preferences attached to an event pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealConsiderations {
    /// Eat dinner before the event when it falls in the evening.
    pub dinner_before: bool,
    /// Minutes before the event to start dinner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner_time: Option<u32>,
    /// Have a light snack an hour before.
    pub light_meal: bool,
    /// Meal timing is up to the family; no meal step is scheduled.
    pub flexible_timing: bool,
}

/// A named classification rule bundling keywords with preparation metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPattern {
    pub name: String,
    pub keywords: Vec<String>,
    /// Minutes needed to get ready before departure.
    pub preparation_time: u32,
    #[serde(default)]
    pub needs_uniform: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal: Option<MealConsiderations>,
    #[serde(default)]
    pub packing_list: Vec<String>,
    #[serde(default)]
    pub attendance: Attendance,
}

impl EventPattern {
    pub fn is_virtual(&self) -> bool {
        matches!(self.attendance, Attendance::Virtual(_))
    }
}

/// An event pattern that matched an event, with a confidence score in `0..=100`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPattern {
    #[serde(flatten)]
    pub pattern: EventPattern,
    pub confidence: u8,
}

// =============================================================================
// Events and timelines
// =============================================================================

/// A calendar event as handed over by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(title: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(start_time),
            ..Self::unscheduled(title)
        }
    }

    /// An event with no start time yet. It never gets a timeline.
    pub fn unscheduled(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            location: None,
            start_time: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A single time-anchored preparation step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub time: DateTime<Utc>,
    pub activity: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    /// Minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ordered preparation steps leading up to an event.
///
/// Invariant: `steps` are sorted by time and the last one is the
/// [`StepType::EventStart`] step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub steps: Vec<TimelineStep>,
    /// Minutes.
    pub total_prep_time: u32,
    pub pattern_name: String,
    pub confidence: u8,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn event_start(&self) -> Option<&TimelineStep> {
        self.steps
            .last()
            .filter(|s| s.step_type == StepType::EventStart)
    }
}

// =============================================================================
// Completion tracking
// =============================================================================

/// Indices of timeline steps a user has marked done.
///
/// Only ever grows; serialized as a plain array of integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeSet<usize>);

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an index. Returns `false` if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    pub fn union_with(&mut self, other: &CompletionSet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Number of indices that address a step of a timeline with `step_count` steps.
    pub fn count_within(&self, step_count: usize) -> usize {
        self.0.range(..step_count).count()
    }
}

impl FromIterator<usize> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
