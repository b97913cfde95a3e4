//! Preparation timeline generation.
//!
//! Works backwards from an event's start time to lay out the steps a family
//! needs to take beforehand. Generation is a pure function of the event, the
//! classified pattern, the family profile, and `now`.

use chrono::{DateTime, Duration, Timelike, Utc};
use prepline_core::{
    Attendance, ClassifiedPattern, Event, EventPattern, FamilyConfig, MealConsiderations,
    StepType, Timeline, TimelineStep, VirtualPrep,
};
use tracing::debug;

const TECH_CHECK_LEAD: i64 = 5;
const TECH_CHECK_MINUTES: u32 = 5;
const WORKSPACE_SETUP_LEAD: i64 = 8;
const WORKSPACE_SETUP_MINUTES: u32 = 3;
const DOCUMENT_REVIEW_LEAD: i64 = 15;
const REFRESH_LEAD: i64 = 20;
const REFRESH_MINUTES: u32 = 5;

const DEFAULT_DINNER_LEAD: u32 = 90;
const LIGHT_MEAL_LEAD: i64 = 60;
const LIGHT_MEAL_MINUTES: u32 = 15;
/// Local hours (inclusive) in which an event pushes dinner before it.
const DINNER_HOURS: std::ops::RangeInclusive<u32> = 17..=20;

const MAX_PACKING_ITEMS: usize = 3;

// =============================================================================
// MealRule
// =============================================================================

/// The single meal rule applied to a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealRule {
    /// Eat dinner this many minutes before the event.
    Dinner { minutes_before: u32 },
    LightMeal,
    Skip,
}

impl MealRule {
    /// Pick the rule for an event starting at `local_hour`. The dinner rule
    /// takes precedence over the light meal; at most one applies.
    pub fn select(meal: Option<&MealConsiderations>, local_hour: u32) -> Self {
        let Some(meal) = meal else {
            return MealRule::Skip;
        };
        if meal.flexible_timing {
            return MealRule::Skip;
        }
        if meal.dinner_before && DINNER_HOURS.contains(&local_hour) {
            return MealRule::Dinner {
                minutes_before: meal.dinner_time.unwrap_or(DEFAULT_DINNER_LEAD),
            };
        }
        if meal.light_meal {
            return MealRule::LightMeal;
        }
        MealRule::Skip
    }
}

// =============================================================================
// TimelineGenerator
// =============================================================================

/// Builds preparation timelines for a given family profile.
#[derive(Debug, Clone)]
pub struct TimelineGenerator {
    family: FamilyConfig,
}

impl TimelineGenerator {
    pub fn new(family: FamilyConfig) -> Self {
        Self { family }
    }

    pub fn family(&self) -> &FamilyConfig {
        &self.family
    }

    /// Generate a timeline for `event`.
    ///
    /// Returns `None` when the event has no start time or does not start
    /// strictly after `now`. Unclassified events get generic in-person steps.
    pub fn generate(
        &self,
        event: &Event,
        pattern: Option<&ClassifiedPattern>,
        now: DateTime<Utc>,
    ) -> Option<Timeline> {
        let Some(start) = event.start_time else {
            debug!(event_id = %event.id, "No start time; skipping timeline");
            return None;
        };
        if start <= now {
            debug!(event_id = %event.id, %start, "Event already started; skipping timeline");
            return None;
        }

        let pattern_ref = pattern.map(|c| &c.pattern);
        let mut steps = Vec::new();

        let total_prep_time = match pattern_ref.map(|p| &p.attendance) {
            Some(Attendance::Virtual(prep)) => virtual_steps(start, prep, &mut steps),
            Some(Attendance::InPerson) | None => {
                self.in_person_steps(event, start, pattern_ref, &mut steps)
            }
        };

        let local_hour = start.with_timezone(&self.family.timezone).hour();
        let meal = MealRule::select(pattern_ref.and_then(|p| p.meal.as_ref()), local_hour);
        match meal {
            MealRule::Dinner { minutes_before } => steps.push(TimelineStep {
                time: start - minutes(minutes_before),
                activity: "Dinner time (eat before event)".to_string(),
                step_type: StepType::Meal,
                duration: self.family.meal_prep_minutes,
                note: Some("Early dinner recommended".to_string()),
            }),
            MealRule::LightMeal => steps.push(TimelineStep {
                time: start - Duration::minutes(LIGHT_MEAL_LEAD),
                activity: "Light snack/meal (avoid heavy food)".to_string(),
                step_type: StepType::Meal,
                duration: LIGHT_MEAL_MINUTES,
                note: Some("Light meal recommended".to_string()),
            }),
            MealRule::Skip => {}
        }

        steps.push(TimelineStep {
            time: start,
            activity: format!("{} begins", event.title),
            step_type: StepType::EventStart,
            duration: 0,
            note: None,
        });

        // Stable: steps sharing a time keep insertion order, so the start stays last.
        steps.sort_by_key(|s| s.time);

        let timeline = Timeline {
            steps,
            total_prep_time,
            pattern_name: pattern_ref
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "general".to_string()),
            confidence: pattern.map_or(0, |c| c.confidence.min(100)),
        };
        debug!(
            event_id = %event.id,
            steps = timeline.len(),
            pattern = %timeline.pattern_name,
            ?meal,
            "Timeline generated"
        );
        Some(timeline)
    }

    /// Departure, optional pet care and getting ready. Returns the total
    /// buffer in minutes.
    fn in_person_steps(
        &self,
        event: &Event,
        start: DateTime<Utc>,
        pattern: Option<&EventPattern>,
        steps: &mut Vec<TimelineStep>,
    ) -> u32 {
        let family = &self.family;
        let departure = start - minutes(family.commute_buffer_minutes);
        let prep_minutes = pattern
            .map(|p| p.preparation_time)
            .unwrap_or(family.general_prep_minutes);

        let mut total = family.commute_buffer_minutes + prep_minutes;

        if family.has_pet {
            steps.push(TimelineStep {
                time: departure - minutes(family.pet_care_minutes),
                activity: "Dog care routine (let out, feed if needed)".to_string(),
                step_type: StepType::DogCare,
                duration: family.pet_care_minutes,
                note: None,
            });
            total += family.pet_care_minutes;
        }

        steps.push(TimelineStep {
            time: departure - minutes(prep_minutes),
            activity: preparation_activity(pattern),
            step_type: StepType::Preparation,
            duration: prep_minutes,
            note: None,
        });

        steps.push(TimelineStep {
            time: departure,
            activity: format!("Leave for {}", event.title),
            step_type: StepType::Departure,
            duration: 0,
            note: None,
        });

        total
    }
}

/// Tech check, workspace, review and a short break. Returns the summed step
/// durations in minutes.
fn virtual_steps(start: DateTime<Utc>, prep: &VirtualPrep, steps: &mut Vec<TimelineStep>) -> u32 {
    let mut total = TECH_CHECK_MINUTES + REFRESH_MINUTES;

    steps.push(TimelineStep {
        time: start - Duration::minutes(TECH_CHECK_LEAD),
        activity: "Join meeting early, test audio/video".to_string(),
        step_type: StepType::TechCheck,
        duration: TECH_CHECK_MINUTES,
        note: None,
    });

    if prep.background_setup.is_some_and(|m| m > 0) {
        steps.push(TimelineStep {
            time: start - Duration::minutes(WORKSPACE_SETUP_LEAD),
            activity: "Tidy background, close unnecessary apps, silence phone".to_string(),
            step_type: StepType::WorkspaceSetup,
            duration: WORKSPACE_SETUP_MINUTES,
            note: None,
        });
        total += WORKSPACE_SETUP_MINUTES;
    }

    if let Some(review) = prep.document_review.filter(|m| *m > 0) {
        steps.push(TimelineStep {
            time: start - Duration::minutes(DOCUMENT_REVIEW_LEAD),
            activity: "Review meeting agenda, notes, and materials".to_string(),
            step_type: StepType::DocumentReview,
            duration: review,
            note: None,
        });
        total += review;
    }

    steps.push(TimelineStep {
        time: start - Duration::minutes(REFRESH_LEAD),
        activity: "Quick break - water, restroom, stretch".to_string(),
        step_type: StepType::Refresh,
        duration: REFRESH_MINUTES,
        note: None,
    });

    total
}

/// Dressing guidance plus the first few packing items.
pub fn preparation_activity(pattern: Option<&EventPattern>) -> String {
    let Some(pattern) = pattern else {
        return "Get ready and gather items".to_string();
    };

    let mut parts = vec![if pattern.needs_uniform {
        "Put on uniform/appropriate clothing".to_string()
    } else {
        "Get dressed appropriately".to_string()
    }];

    if !pattern.packing_list.is_empty() {
        let shown: Vec<&str> = pattern
            .packing_list
            .iter()
            .take(MAX_PACKING_ITEMS)
            .map(String::as_str)
            .collect();
        let more = if pattern.packing_list.len() > MAX_PACKING_ITEMS {
            "..."
        } else {
            ""
        };
        parts.push(format!("Pack items: {}{}", shown.join(", "), more));
    }

    parts.join(", ")
}

fn minutes(m: u32) -> Duration {
    Duration::minutes(i64::from(m))
}

// =============================================================================
// Tests
// =============================================================================
