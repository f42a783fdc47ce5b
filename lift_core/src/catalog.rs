//! Default exercise library and suggested vocabularies.
//!
//! Equipment types and muscle groups are an open vocabulary: the lists here
//! are what the front end offers, the store accepts any non-empty text.

use crate::types::ExerciseDraft;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Suggested equipment types, in display order
pub const EQUIPMENT_TYPES: &[&str] = &[
    "Dumbbell",
    "Barbell",
    "Free Weight",
    "Machine",
    "Plate-Loaded Machine",
    "Cable",
    "Treadmill",
    "Assault Bike",
    "Bike",
    "Stairmaster",
];

/// Suggested muscle groups, in display order
pub const MUSCLE_GROUPS: &[&str] = &[
    "back",
    "chest",
    "biceps",
    "triceps",
    "shoulders",
    "core",
    "lower body",
    "full body",
];

/// Cached default library - built once and reused for every seed
static DEFAULT_LIBRARY: Lazy<Vec<ExerciseDraft>> = Lazy::new(build_default_library);

/// Get a reference to the cached default exercise library
pub fn default_library() -> &'static [ExerciseDraft] {
    &DEFAULT_LIBRARY
}

fn build_default_library() -> Vec<ExerciseDraft> {
    [
        // Barbell
        ("Bench Press", "Barbell", "chest"),
        ("Back Squat", "Barbell", "lower body"),
        ("Deadlift", "Barbell", "back"),
        ("Overhead Press", "Barbell", "shoulders"),
        ("Bent-Over Row", "Barbell", "back"),
        // Dumbbell
        ("Incline Dumbbell Press", "Dumbbell", "chest"),
        ("Dumbbell Curl", "Dumbbell", "biceps"),
        ("Lateral Raise", "Dumbbell", "shoulders"),
        ("Goblet Squat", "Dumbbell", "lower body"),
        // Cable
        ("Tricep Pushdown", "Cable", "triceps"),
        ("Lat Pulldown", "Cable", "back"),
        ("Cable Crunch", "Cable", "core"),
        // Machines
        ("Leg Press", "Plate-Loaded Machine", "lower body"),
        ("Chest Fly", "Machine", "chest"),
        ("Seated Row", "Machine", "back"),
        // Free weight
        ("Weighted Dip", "Free Weight", "triceps"),
        // Conditioning
        ("Assault Bike Sprint", "Assault Bike", "full body"),
        ("Incline Walk", "Treadmill", "lower body"),
        ("Stair Climb", "Stairmaster", "lower body"),
    ]
    .into_iter()
    .map(|(name, equipment, muscle)| ExerciseDraft::new(name, equipment, muscle))
    .collect()
}

/// Validate a library for completeness
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate_library(library: &[ExerciseDraft]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for draft in library {
        if draft.name.trim().is_empty() {
            errors.push("Exercise has empty name".to_string());
            continue;
        }
        if draft.equipment_type.trim().is_empty() {
            errors.push(format!("Exercise '{}' has empty equipment type", draft.name));
        }
        if draft.muscle_group.trim().is_empty() {
            errors.push(format!("Exercise '{}' has empty muscle group", draft.name));
        }
        if !seen.insert(draft.name.trim()) {
            errors.push(format!("Exercise '{}' appears more than once", draft.name));
        }
    }

    errors
}

/// Capitalize the first letter of each space-separated word
///
/// Used when displaying muscle groups ("lower body" -> "Lower Body").
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
