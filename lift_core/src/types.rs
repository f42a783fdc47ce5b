//! Core domain types for the lift tracker.
//!
//! This module defines the records held by the data store:
//! - Exercises in the library
//! - Workouts assembled from exercise references
//! - Weight entries in the append-only progress log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

record_id!(
    /// Store-assigned exercise identifier, never a list position
    ExerciseId
);
record_id!(
    /// Store-assigned workout identifier
    WorkoutId
);
record_id!(
    /// Store-assigned weight entry identifier
    EntryId
);

// ============================================================================
// Records
// ============================================================================

/// An exercise in the library (e.g., "Bench Press" on a barbell for chest)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub equipment_type: String,
    pub muscle_group: String,
}

/// A named, ordered collection of exercise references
///
/// `exercise_ids` may contain duplicates and may reference exercises that
/// have since been deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub name: String,
    pub exercise_ids: Vec<ExerciseId>,
    pub created_at: DateTime<Utc>,
}

/// One immutable record of weight/reps/sets performed for an exercise
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: EntryId,
    pub exercise_id: ExerciseId,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub workout_id: Option<WorkoutId>,
}

impl WeightEntry {
    /// Total load moved: weight × reps × sets
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps) * f64::from(self.sets)
    }
}

/// Fields supplied when creating or replacing an exercise
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub name: String,
    pub equipment_type: String,
    pub muscle_group: String,
}

impl ExerciseDraft {
    pub fn new(
        name: impl Into<String>,
        equipment_type: impl Into<String>,
        muscle_group: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            equipment_type: equipment_type.into(),
            muscle_group: muscle_group.into(),
        }
    }
}

/// Fields supplied when logging a weight entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub exercise_id: ExerciseId,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub workout_id: Option<WorkoutId>,
}

// ============================================================================
// Reference Resolution
// ============================================================================

/// A workout's exercise reference after lookup
///
/// A deleted exercise is a valid, renderable state rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub enum ExerciseSlot {
    Found(Exercise),
    Missing(ExerciseId),
}

impl ExerciseSlot {
    pub fn id(&self) -> ExerciseId {
        match self {
            ExerciseSlot::Found(exercise) => exercise.id,
            ExerciseSlot::Missing(id) => *id,
        }
    }

    pub fn as_found(&self) -> Option<&Exercise> {
        match self {
            ExerciseSlot::Found(exercise) => Some(exercise),
            ExerciseSlot::Missing(_) => None,
        }
    }
}
