//! In-memory data store for exercises, workouts and weight entries.
//!
//! The store owns all three collections and assigns identifiers from
//! per-collection counters that only ever increase. Text fields are stored
//! trimmed. Every mutating method validates its input before touching any
//! state, so a failed call leaves the store exactly as it was.
//!
//! References between records are lookup-only: deleting an exercise or a
//! workout never cascades, and dangling ids are left in place.

use crate::error::Error;
use crate::types::*;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Owner of the exercise, workout and weight entry collections
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Snapshot", into = "Snapshot")]
pub struct DataStore {
    exercises: BTreeMap<ExerciseId, Exercise>,
    workouts: BTreeMap<WorkoutId, Workout>,
    /// Append-only, kept in insertion order
    entries: Vec<WeightEntry>,
    last_exercise_id: u64,
    last_workout_id: u64,
    last_entry_id: u64,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.workouts.is_empty() && self.entries.is_empty()
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    pub fn create_exercise(&mut self, draft: ExerciseDraft) -> Result<ExerciseId> {
        let draft = trim_exercise(draft);
        validate_exercise(&draft)?;

        let id = ExerciseId(next_id(&mut self.last_exercise_id, "exercise")?);
        self.exercises.insert(
            id,
            Exercise {
                id,
                name: draft.name,
                equipment_type: draft.equipment_type,
                muscle_group: draft.muscle_group,
            },
        );
        Ok(id)
    }

    /// Replace all three fields of an existing exercise
    pub fn update_exercise(&mut self, id: ExerciseId, draft: ExerciseDraft) -> Result<()> {
        let exercise = self
            .exercises
            .get_mut(&id)
            .ok_or_else(|| Error::exercise_not_found(id))?;
        let draft = trim_exercise(draft);
        validate_exercise(&draft)?;

        exercise.name = draft.name;
        exercise.equipment_type = draft.equipment_type;
        exercise.muscle_group = draft.muscle_group;
        Ok(())
    }

    /// Remove an exercise; workouts and entries referencing it are untouched
    pub fn delete_exercise(&mut self, id: ExerciseId) -> Result<()> {
        self.exercises
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::exercise_not_found(id))
    }

    pub fn get_exercise(&self, id: ExerciseId) -> Result<&Exercise> {
        self.exercises
            .get(&id)
            .ok_or_else(|| Error::exercise_not_found(id))
    }

    /// All exercises ordered by name
    ///
    /// Names compare case-insensitively; ties fall back to the exact name
    /// and then to the id, so the order never depends on insertion order.
    pub fn get_all_exercises_sorted(&self) -> Vec<Exercise> {
        let mut exercises: Vec<Exercise> = self.exercises.values().cloned().collect();
        sort_by_name(&mut exercises);
        exercises
    }

    /// Exercises whose equipment type matches exactly (case-sensitive)
    pub fn filter_exercises_by_equipment_type(&self, equipment_type: &str) -> Vec<Exercise> {
        self.filter_exercises(|e| e.equipment_type == equipment_type)
    }

    /// Exercises whose muscle group matches exactly (case-sensitive)
    pub fn filter_exercises_by_muscle_group(&self, muscle_group: &str) -> Vec<Exercise> {
        self.filter_exercises(|e| e.muscle_group == muscle_group)
    }

    fn filter_exercises<F>(&self, predicate: F) -> Vec<Exercise>
    where
        F: Fn(&Exercise) -> bool,
    {
        let mut exercises: Vec<Exercise> = self
            .exercises
            .values()
            .filter(|e| predicate(*e))
            .cloned()
            .collect();
        sort_by_name(&mut exercises);
        exercises
    }

    /// Insert every library exercise whose name is not already present
    ///
    /// Returns the ids created, in library order. Running it twice creates
    /// nothing the second time.
    pub fn seed_exercises(&mut self, library: &[ExerciseDraft]) -> Result<Vec<ExerciseId>> {
        for draft in library {
            validate_exercise(draft)?;
        }

        let mut known: HashSet<String> = self.exercises.values().map(|e| e.name.clone()).collect();
        let pending: Vec<&ExerciseDraft> = library
            .iter()
            .filter(|draft| known.insert(draft.name.trim().to_string()))
            .collect();

        // All or nothing: make sure every pending exercise can get an id
        let mut counter = self.last_exercise_id;
        for _ in &pending {
            next_id(&mut counter, "exercise")?;
        }

        pending
            .into_iter()
            .map(|draft| self.create_exercise(draft.clone()))
            .collect()
    }

    // ========================================================================
    // Workouts
    // ========================================================================

    /// Create a workout; exercise ids are accepted without existence checks
    pub fn create_workout(
        &mut self,
        name: impl Into<String>,
        exercise_ids: Vec<ExerciseId>,
        now: DateTime<Utc>,
    ) -> Result<WorkoutId> {
        let name = name.into().trim().to_string();
        validate_workout_name(&name)?;

        let id = WorkoutId(next_id(&mut self.last_workout_id, "workout")?);
        self.workouts.insert(
            id,
            Workout {
                id,
                name,
                exercise_ids,
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Replace name and exercise list; `created_at` is kept
    pub fn update_workout(
        &mut self,
        id: WorkoutId,
        name: impl Into<String>,
        exercise_ids: Vec<ExerciseId>,
    ) -> Result<()> {
        let workout = self
            .workouts
            .get_mut(&id)
            .ok_or_else(|| Error::workout_not_found(id))?;
        let name = name.into().trim().to_string();
        validate_workout_name(&name)?;

        workout.name = name;
        workout.exercise_ids = exercise_ids;
        Ok(())
    }

    /// Remove a workout; entries logged against it keep their workout id
    pub fn delete_workout(&mut self, id: WorkoutId) -> Result<()> {
        self.workouts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::workout_not_found(id))
    }

    pub fn get_workout(&self, id: WorkoutId) -> Result<&Workout> {
        self.workouts
            .get(&id)
            .ok_or_else(|| Error::workout_not_found(id))
    }

    /// All workouts, newest first
    pub fn list_workouts(&self) -> Vec<Workout> {
        let mut workouts: Vec<Workout> = self.workouts.values().cloned().collect();
        workouts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        workouts
    }

    /// Look up each exercise a workout references, in workout order
    pub fn resolve_workout_exercises(&self, id: WorkoutId) -> Result<Vec<ExerciseSlot>> {
        let workout = self.get_workout(id)?;
        Ok(workout
            .exercise_ids
            .iter()
            .map(|exercise_id| match self.exercises.get(exercise_id) {
                Some(exercise) => ExerciseSlot::Found(exercise.clone()),
                None => ExerciseSlot::Missing(*exercise_id),
            })
            .collect())
    }

    // ========================================================================
    // Weight entries
    // ========================================================================

    /// Append a weight entry dated `now`
    ///
    /// The exercise (and workout) need not exist: the log keeps historical
    /// references.
    pub fn log_weight_entry(&mut self, draft: EntryDraft, now: DateTime<Utc>) -> Result<EntryId> {
        validate_entry(&draft)?;

        let id = EntryId(next_id(&mut self.last_entry_id, "entry")?);
        self.entries.push(WeightEntry {
            id,
            exercise_id: draft.exercise_id,
            weight: draft.weight,
            reps: draft.reps,
            sets: draft.sets,
            date: now,
            workout_id: draft.workout_id,
        });
        Ok(id)
    }

    /// Every entry for an exercise, in insertion order
    pub fn get_weight_progress(&self, exercise_id: ExerciseId) -> Vec<WeightEntry> {
        self.entries
            .iter()
            .filter(|e| e.exercise_id == exercise_id)
            .cloned()
            .collect()
    }

    /// The whole log, in insertion order
    pub fn list_weight_entries(&self) -> &[WeightEntry] {
        &self.entries
    }
}

fn sort_by_name(exercises: &mut [Exercise]) {
    exercises.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Advance a counter, refusing to wrap around onto ids already handed out
fn next_id(counter: &mut u64, kind: &str) -> Result<u64> {
    let next = counter
        .checked_add(1)
        .ok_or_else(|| Error::validation(format!("no {} ids left to assign", kind)))?;
    *counter = next;
    Ok(next)
}

fn trim_exercise(draft: ExerciseDraft) -> ExerciseDraft {
    ExerciseDraft {
        name: draft.name.trim().to_string(),
        equipment_type: draft.equipment_type.trim().to_string(),
        muscle_group: draft.muscle_group.trim().to_string(),
    }
}

fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn validate_exercise(draft: &ExerciseDraft) -> Result<()> {
    require_text(&draft.name, "exercise name")?;
    require_text(&draft.equipment_type, "equipment type")?;
    require_text(&draft.muscle_group, "muscle group")
}

fn validate_workout_name(name: &str) -> Result<()> {
    require_text(name, "workout name")
}

fn validate_entry(draft: &EntryDraft) -> Result<()> {
    if !draft.weight.is_finite() || draft.weight < 0.0 {
        return Err(Error::validation(format!(
            "weight must be a non-negative number, got {}",
            draft.weight
        )));
    }
    if draft.reps == 0 {
        return Err(Error::validation("reps must be positive"));
    }
    if draft.sets == 0 {
        return Err(Error::validation("sets must be positive"));
    }
    Ok(())
}

// ============================================================================
// Snapshot format
// ============================================================================

/// On-disk layout: plain lists plus the id counters
#[derive(Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    exercises: Vec<Exercise>,
    #[serde(default)]
    workouts: Vec<Workout>,
    #[serde(default)]
    entries: Vec<WeightEntry>,
    #[serde(default)]
    last_exercise_id: u64,
    #[serde(default)]
    last_workout_id: u64,
    #[serde(default)]
    last_entry_id: u64,
}

impl From<DataStore> for Snapshot {
    fn from(store: DataStore) -> Self {
        Snapshot {
            exercises: store.exercises.into_values().collect(),
            workouts: store.workouts.into_values().collect(),
            entries: store.entries,
            last_exercise_id: store.last_exercise_id,
            last_workout_id: store.last_workout_id,
            last_entry_id: store.last_entry_id,
        }
    }
}

impl From<Snapshot> for DataStore {
    fn from(snapshot: Snapshot) -> Self {
        // Counters never fall behind a stored id, even in a hand-edited file
        let last_exercise_id = snapshot
            .exercises
            .iter()
            .map(|e| e.id.0)
            .fold(snapshot.last_exercise_id, u64::max);
        let last_workout_id = snapshot
            .workouts
            .iter()
            .map(|w| w.id.0)
            .fold(snapshot.last_workout_id, u64::max);
        let last_entry_id = snapshot
            .entries
            .iter()
            .map(|e| e.id.0)
            .fold(snapshot.last_entry_id, u64::max);

        DataStore {
            exercises: snapshot.exercises.into_iter().map(|e| (e.id, e)).collect(),
            workouts: snapshot.workouts.into_iter().map(|w| (w.id, w)).collect(),
            entries: snapshot.entries,
            last_exercise_id,
            last_workout_id,
            last_entry_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn draft(name: &str, equipment: &str, muscle: &str) -> ExerciseDraft {
        ExerciseDraft::new(name, equipment, muscle)
    }

    fn entry(exercise_id: ExerciseId, weight: f64, reps: u32, sets: u32) -> EntryDraft {
        EntryDraft {
            exercise_id,
            weight,
            reps,
            sets,
            workout_id: None,
        }
    }

    #[test]
    fn test_create_then_get_returns_same_fields() {
        let mut store = DataStore::new();
        let id = store
            .create_exercise(draft("Bench Press", "Barbell", "chest"))
            .unwrap();

        let exercise = store.get_exercise(id).unwrap();
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.equipment_type, "Barbell");
        assert_eq!(exercise.muscle_group, "chest");
    }

    #[test]
    fn test_create_exercise_rejects_empty_fields() {
        let mut store = DataStore::new();
        for bad in [
            draft("", "Barbell", "chest"),
            draft("Bench", "", "chest"),
            draft("Bench", "Barbell", "   "),
        ] {
            let err = store.create_exercise(bad).unwrap_err();
            assert!(err.is_validation(), "unexpected error {:?}", err);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = DataStore::new();
        let a = store.create_exercise(draft("A", "Cable", "back")).unwrap();
        store.delete_exercise(a).unwrap();
        let b = store.create_exercise(draft("B", "Cable", "back")).unwrap();
        assert!(b > a);

        let w1 = store.create_workout("W1", vec![], t0()).unwrap();
        store.delete_workout(w1).unwrap();
        let w2 = store.create_workout("W2", vec![], t0()).unwrap();
        assert!(w2 > w1);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let mut store = DataStore::new();
        let id = store.create_exercise(draft("Row", "Cable", "back")).unwrap();
        store.delete_exercise(id).unwrap();

        assert!(store.get_exercise(id).unwrap_err().is_not_found());
        assert!(store.delete_exercise(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_exercise() {
        let mut store = DataStore::new();
        let id = store.create_exercise(draft("Row", "Cable", "back")).unwrap();

        store
            .update_exercise(id, draft("Seated Row", "Machine", "back"))
            .unwrap();
        let exercise = store.get_exercise(id).unwrap();
        assert_eq!(exercise.name, "Seated Row");
        assert_eq!(exercise.equipment_type, "Machine");
    }

    #[test]
    fn test_update_exercise_missing_id_wins_over_validation() {
        let mut store = DataStore::new();
        let err = store
            .update_exercise(ExerciseId(99), draft("", "", ""))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_exercise_invalid_leaves_record() {
        let mut store = DataStore::new();
        let id = store.create_exercise(draft("Row", "Cable", "back")).unwrap();
        let before = store.clone();

        let err = store
            .update_exercise(id, draft("Row", "", "back"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_with_same_values_is_noop() {
        let mut store = DataStore::new();
        let id = store.create_exercise(draft("Row", "Cable", "back")).unwrap();
        let before = store.clone();

        store.update_exercise(id, draft("Row", "Cable", "back")).unwrap();
        assert_eq!(store, before);
    }

    #[test]
    fn test_sorted_listing_ignores_insertion_order() {
        let names = ["squat", "Bench Press", "deadlift", "Curl", "bench press"];

        let mut forward = DataStore::new();
        for name in names {
            forward.create_exercise(draft(name, "Barbell", "chest")).unwrap();
        }
        let mut backward = DataStore::new();
        for name in names.iter().rev() {
            backward.create_exercise(draft(name, "Barbell", "chest")).unwrap();
        }

        let sorted = |store: &DataStore| -> Vec<String> {
            store
                .get_all_exercises_sorted()
                .into_iter()
                .map(|e| e.name)
                .collect()
        };
        assert_eq!(
            sorted(&forward),
            vec!["Bench Press", "bench press", "Curl", "deadlift", "squat"]
        );
        assert_eq!(sorted(&forward), sorted(&backward));
    }

    #[test]
    fn test_filter_by_equipment_is_exact() {
        let mut store = DataStore::new();
        store.create_exercise(draft("Bench", "Barbell", "chest")).unwrap();
        store.create_exercise(draft("Squat", "Barbell", "lower body")).unwrap();
        store.create_exercise(draft("Curl", "Dumbbell", "biceps")).unwrap();
        store.create_exercise(draft("Odd", "barbell", "core")).unwrap();
        store.create_exercise(draft("Odder", "Barbell Rack", "core")).unwrap();

        let found = store.filter_exercises_by_equipment_type("Barbell");
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench", "Squat"]);

        assert!(store.filter_exercises_by_equipment_type("Kettlebell").is_empty());
    }

    #[test]
    fn test_filter_by_muscle_group_is_exact() {
        let mut store = DataStore::new();
        store.create_exercise(draft("Squat", "Barbell", "lower body")).unwrap();
        store.create_exercise(draft("Leg Press", "Machine", "lower body")).unwrap();
        store.create_exercise(draft("Crunch", "Cable", "core")).unwrap();

        let found = store.filter_exercises_by_muscle_group("lower body");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.muscle_group == "lower body"));
        assert!(store.filter_exercises_by_muscle_group("Lower Body").is_empty());
    }

    #[test]
    fn test_workout_keeps_order_and_duplicates() {
        let mut store = DataStore::new();
        let ids = vec![ExerciseId(1), ExerciseId(2), ExerciseId(3), ExerciseId(1)];
        let id = store.create_workout("Leg Day", ids.clone(), t0()).unwrap();

        let workout = store.get_workout(id).unwrap();
        assert_eq!(workout.exercise_ids, ids);
        assert_eq!(workout.created_at, t0());
    }

    #[test]
    fn test_create_workout_requires_name() {
        let mut store = DataStore::new();
        let err = store.create_workout(" ", vec![], t0()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_workout_keeps_created_at() {
        let mut store = DataStore::new();
        let id = store
            .create_workout("Push", vec![ExerciseId(1)], t0())
            .unwrap();

        store
            .update_workout(id, "Push A", vec![ExerciseId(2), ExerciseId(1)])
            .unwrap();
        let workout = store.get_workout(id).unwrap();
        assert_eq!(workout.name, "Push A");
        assert_eq!(workout.exercise_ids, vec![ExerciseId(2), ExerciseId(1)]);
        assert_eq!(workout.created_at, t0());
    }

    #[test]
    fn test_update_missing_workout_leaves_store_unchanged() {
        let mut store = DataStore::new();
        store.create_workout("Push", vec![ExerciseId(1)], t0()).unwrap();
        let before = store.clone();

        let err = store
            .update_workout(WorkoutId(42), "Pull", vec![ExerciseId(2)])
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store, before);
    }

    #[test]
    fn test_dangling_exercise_in_workout_resolves_as_missing() {
        let mut store = DataStore::new();
        let bench = store.create_exercise(draft("Bench", "Barbell", "chest")).unwrap();
        let fly = store.create_exercise(draft("Fly", "Machine", "chest")).unwrap();
        let workout = store.create_workout("Chest", vec![bench, fly], t0()).unwrap();

        store.delete_exercise(fly).unwrap();

        assert_eq!(store.get_workout(workout).unwrap().exercise_ids, vec![bench, fly]);
        let slots = store.resolve_workout_exercises(workout).unwrap();
        assert_eq!(slots[0].as_found().map(|e| e.name.as_str()), Some("Bench"));
        assert_eq!(slots[1], ExerciseSlot::Missing(fly));
    }

    #[test]
    fn test_list_workouts_newest_first() {
        let mut store = DataStore::new();
        let old = store.create_workout("Old", vec![], t0()).unwrap();
        let new = store
            .create_workout("New", vec![], t0() + Duration::days(1))
            .unwrap();

        let ids: Vec<_> = store.list_workouts().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![new, old]);
    }

    #[test]
    fn test_progress_in_insertion_order() {
        let mut store = DataStore::new();
        let ex = ExerciseId(1);
        store.log_weight_entry(entry(ex, 135.0, 10, 3), t0()).unwrap();
        store.log_weight_entry(entry(ExerciseId(2), 50.0, 8, 3), t0()).unwrap();
        store
            .log_weight_entry(entry(ex, 140.0, 8, 3), t0() - Duration::days(1))
            .unwrap();

        let progress = store.get_weight_progress(ex);
        let weights: Vec<_> = progress.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![135.0, 140.0]);
        assert_eq!(progress[0].date, t0());
    }

    #[test]
    fn test_log_rejects_bad_numbers() {
        let mut store = DataStore::new();
        let ex = ExerciseId(1);
        for bad in [
            entry(ex, 100.0, 0, 3),
            entry(ex, 100.0, 5, 0),
            entry(ex, -1.0, 5, 3),
            entry(ex, f64::NAN, 5, 3),
            entry(ex, f64::INFINITY, 5, 3),
        ] {
            assert!(store.log_weight_entry(bad, t0()).unwrap_err().is_validation());
        }
        assert!(store.list_weight_entries().is_empty());
    }

    #[test]
    fn test_log_accepts_zero_weight_and_unknown_references() {
        let mut store = DataStore::new();
        let id = store
            .log_weight_entry(
                EntryDraft {
                    exercise_id: ExerciseId(77),
                    weight: 0.0,
                    reps: 12,
                    sets: 2,
                    workout_id: Some(WorkoutId(5)),
                },
                t0(),
            )
            .unwrap();
        assert_eq!(id, EntryId(1));
        assert_eq!(store.get_weight_progress(ExerciseId(77)).len(), 1);
    }

    #[test]
    fn test_delete_workout_leaves_entries() {
        let mut store = DataStore::new();
        let workout = store.create_workout("Legs", vec![], t0()).unwrap();
        store
            .log_weight_entry(
                EntryDraft {
                    exercise_id: ExerciseId(1),
                    weight: 225.0,
                    reps: 5,
                    sets: 5,
                    workout_id: Some(workout),
                },
                t0(),
            )
            .unwrap();

        store.delete_workout(workout).unwrap();
        assert_eq!(store.list_weight_entries()[0].workout_id, Some(workout));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut store = DataStore::new();
        store.create_exercise(draft("Deadlift", "Barbell", "back")).unwrap();
        let library = vec![
            draft("Deadlift", "Barbell", "back"),
            draft("Lat Pulldown", "Cable", "back"),
        ];

        let created = store.seed_exercises(&library).unwrap();
        assert_eq!(created.len(), 1);
        assert!(store.seed_exercises(&library).unwrap().is_empty());
        assert_eq!(store.get_all_exercises_sorted().len(), 2);
    }

    #[test]
    fn test_seed_with_invalid_draft_creates_nothing() {
        let mut store = DataStore::new();
        let library = vec![draft("Row", "Cable", "back"), draft("", "Cable", "back")];
        assert!(store.seed_exercises(&library).unwrap_err().is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_restores_counters() {
        let mut store = DataStore::new();
        let a = store.create_exercise(draft("A", "Cable", "back")).unwrap();
        let b = store.create_exercise(draft("B", "Cable", "back")).unwrap();
        store.delete_exercise(b).unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let mut restored: DataStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);

        let c = restored.create_exercise(draft("C", "Cable", "back")).unwrap();
        assert!(c > b);
        assert!(restored.get_exercise(a).is_ok());
    }

    #[test]
    fn test_text_fields_are_stored_trimmed() {
        let mut store = DataStore::new();
        let id = store
            .create_exercise(draft("  Bench  ", "Barbell ", " chest"))
            .unwrap();

        let exercise = store.get_exercise(id).unwrap();
        assert_eq!(exercise.name, "Bench");
        assert_eq!(exercise.equipment_type, "Barbell");
        assert_eq!(exercise.muscle_group, "chest");
        assert_eq!(store.filter_exercises_by_equipment_type("Barbell").len(), 1);

        store
            .update_exercise(id, draft(" Incline Bench ", "Barbell", "chest "))
            .unwrap();
        let exercise = store.get_exercise(id).unwrap();
        assert_eq!(exercise.name, "Incline Bench");
        assert_eq!(exercise.muscle_group, "chest");

        let workout = store.create_workout("  Push  ", vec![id], t0()).unwrap();
        assert_eq!(store.get_workout(workout).unwrap().name, "Push");
        store.update_workout(workout, " Push A\n", vec![id]).unwrap();
        assert_eq!(store.get_workout(workout).unwrap().name, "Push A");
    }

    #[test]
    fn test_seed_skips_names_that_differ_only_by_padding() {
        let mut store = DataStore::new();
        store.create_exercise(draft("Deadlift", "Barbell", "back")).unwrap();

        let created = store
            .seed_exercises(&[draft(" Deadlift ", "Barbell", "back")])
            .unwrap();
        assert!(created.is_empty());
    }

    #[test]
    fn test_exhausted_counter_is_an_error_not_a_wrap() {
        let json = format!(
            r#"{{"exercises":[{{"id":{},"name":"Row","equipment_type":"Cable","muscle_group":"back"}}],
                "workouts":[{{"id":{},"name":"Legs","exercise_ids":[],"created_at":"2024-03-01T09:00:00Z"}}],
                "last_entry_id":{}}}"#,
            u64::MAX,
            u64::MAX,
            u64::MAX
        );
        let mut store: DataStore = serde_json::from_str(&json).unwrap();
        let before = store.clone();

        let err = store
            .create_exercise(draft("Curl", "Dumbbell", "biceps"))
            .unwrap_err();
        assert!(err.is_validation(), "unexpected error {:?}", err);
        assert!(store.create_workout("Push", vec![], t0()).unwrap_err().is_validation());
        assert!(store
            .log_weight_entry(entry(ExerciseId(1), 50.0, 5, 5), t0())
            .unwrap_err()
            .is_validation());
        assert!(store
            .seed_exercises(&[draft("Press", "Barbell", "shoulders")])
            .unwrap_err()
            .is_validation());

        assert_eq!(store, before);
        assert_eq!(store.get_exercise(ExerciseId(u64::MAX)).unwrap().name, "Row");
    }

    #[test]
    fn test_snapshot_counter_catches_up_with_ids() {
        let json = r#"{"exercises":[{"id":9,"name":"Row","equipment_type":"Cable","muscle_group":"back"}]}"#;
        let mut store: DataStore = serde_json::from_str(json).unwrap();
        let id = store.create_exercise(draft("Curl", "Dumbbell", "biceps")).unwrap();
        assert_eq!(id, ExerciseId(10));
    }
}
