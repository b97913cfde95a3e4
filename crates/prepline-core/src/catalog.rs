//! Built-in event pattern catalog.
//!
//! Declaration order matters: the default classifier picks the first pattern
//! with a keyword hit, so more specific patterns come first.

use crate::types::{Attendance, EventPattern, MealConsiderations, VirtualPrep};

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The default patterns, in evaluation order.
pub fn default_patterns() -> Vec<EventPattern> {
    vec![
        EventPattern {
            name: "scouts".into(),
            keywords: words(&["scouts", "scout", "troop", "den"]),
            preparation_time: 45,
            needs_uniform: true,
            meal: Some(MealConsiderations {
                dinner_before: true,
                dinner_time: Some(90),
                ..Default::default()
            }),
            packing_list: words(&["Scout uniform", "Handbook", "Water bottle", "Snacks"]),
            attendance: Attendance::InPerson,
        },
        EventPattern {
            name: "sports".into(),
            keywords: words(&[
                "soccer",
                "football",
                "baseball",
                "basketball",
                "practice",
                "game",
                "tournament",
            ]),
            preparation_time: 60,
            needs_uniform: true,
            // Dinner comes after practice; nothing to schedule beforehand.
            meal: Some(MealConsiderations::default()),
            packing_list: words(&[
                "Sports uniform",
                "Cleats",
                "Shin guards",
                "Water bottle",
                "Towel",
                "Change of clothes",
            ]),
            attendance: Attendance::InPerson,
        },
        EventPattern {
            name: "school".into(),
            keywords: words(&[
                "school",
                "class",
                "meeting",
                "conference",
                "pta",
                "parent-teacher",
            ]),
            preparation_time: 30,
            needs_uniform: false,
            meal: Some(MealConsiderations {
                dinner_time: Some(60),
                ..Default::default()
            }),
            packing_list: words(&["Notebook", "Pen", "School materials"]),
            attendance: Attendance::InPerson,
        },
        EventPattern {
            name: "medical".into(),
            keywords: words(&["doctor", "dentist", "appointment", "checkup", "medical"]),
            preparation_time: 30,
            needs_uniform: false,
            meal: Some(MealConsiderations {
                light_meal: true,
                ..Default::default()
            }),
            packing_list: words(&["Insurance cards", "ID", "Medical records", "Medication list"]),
            attendance: Attendance::InPerson,
        },
        EventPattern {
            name: "social".into(),
            keywords: words(&["party", "birthday", "playdate", "sleepover"]),
            preparation_time: 45,
            needs_uniform: false,
            meal: Some(MealConsiderations::default()),
            packing_list: words(&["Gift", "Card", "Change of clothes", "Toothbrush"]),
            attendance: Attendance::InPerson,
        },
        EventPattern {
            name: "online_meeting".into(),
            keywords: words(&[
                "zoom",
                "teams",
                "meet",
                "webinar",
                "virtual",
                "online",
                "video call",
                "video conference",
                "remote",
            ]),
            preparation_time: 10,
            needs_uniform: false,
            meal: Some(MealConsiderations {
                flexible_timing: true,
                ..Default::default()
            }),
            packing_list: words(&["Notebook", "Pen", "Meeting agenda/notes", "Water bottle"]),
            attendance: Attendance::Virtual(VirtualPrep {
                background_setup: Some(3),
                document_review: Some(10),
            }),
        },
        EventPattern {
            name: "work_meeting".into(),
            keywords: words(&[
                "meeting",
                "conference",
                "presentation",
                "review",
                "standup",
                "sync",
            ]),
            preparation_time: 15,
            needs_uniform: false,
            meal: Some(MealConsiderations {
                light_meal: true,
                ..Default::default()
            }),
            packing_list: words(&["Laptop", "Charger", "Notebook", "Business cards"]),
            attendance: Attendance::InPerson,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<String> = default_patterns().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "scouts",
                "sports",
                "school",
                "medical",
                "social",
                "online_meeting",
                "work_meeting"
            ]
        );
    }

    #[test]
    fn test_every_pattern_has_keywords() {
        for p in default_patterns() {
            assert!(!p.keywords.is_empty(), "{} has no keywords", p.name);
            assert!(p.keywords.iter().all(|k| k == &k.to_lowercase()));
        }
    }

    #[test]
    fn test_only_online_meeting_is_virtual() {
        let virtual_names: Vec<String> = default_patterns()
            .into_iter()
            .filter(|p| p.is_virtual())
            .map(|p| p.name)
            .collect();
        assert_eq!(virtual_names, vec!["online_meeting"]);
    }
}
