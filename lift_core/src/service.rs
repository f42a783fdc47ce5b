//! Query/mutation service over the data store.
//!
//! `FitnessService` is the externally callable surface. Each call takes the
//! store lock exactly once, so concurrent callers always observe a complete
//! snapshot. When backed by a file, a mutation is applied to a working copy
//! which is saved before it replaces the live store: either both the disk
//! and memory change, or neither does.

use crate::catalog;
use crate::types::*;
use crate::{DataStore, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Operations the front end consumes
///
/// Implemented by [`FitnessService`]; [`crate::cache::CachedClient`] wraps
/// any implementation.
pub trait FitnessApi {
    fn create_exercise(&self, draft: ExerciseDraft) -> Result<ExerciseId>;
    fn update_exercise(&self, id: ExerciseId, draft: ExerciseDraft) -> Result<()>;
    fn delete_exercise(&self, id: ExerciseId) -> Result<()>;
    fn get_exercise(&self, id: ExerciseId) -> Result<Exercise>;
    fn get_all_exercises_sorted(&self) -> Result<Vec<Exercise>>;
    fn filter_exercises_by_equipment_type(&self, equipment_type: &str) -> Result<Vec<Exercise>>;
    fn filter_exercises_by_muscle_group(&self, muscle_group: &str) -> Result<Vec<Exercise>>;
    fn seed_exercises(&self) -> Result<Vec<ExerciseId>>;

    fn create_workout(&self, name: &str, exercise_ids: Vec<ExerciseId>) -> Result<WorkoutId>;
    fn update_workout(&self, id: WorkoutId, name: &str, exercise_ids: Vec<ExerciseId>)
        -> Result<()>;
    fn delete_workout(&self, id: WorkoutId) -> Result<()>;
    fn get_workout(&self, id: WorkoutId) -> Result<Workout>;
    fn list_workouts(&self) -> Result<Vec<Workout>>;
    fn resolve_workout_exercises(&self, id: WorkoutId) -> Result<Vec<ExerciseSlot>>;

    fn log_weight_entry(&self, draft: EntryDraft) -> Result<EntryId>;
    fn get_weight_progress(&self, exercise_id: ExerciseId) -> Result<Vec<WeightEntry>>;
    fn list_weight_entries(&self) -> Result<Vec<WeightEntry>>;
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Thread-safe service owning the data store
pub struct FitnessService {
    store: Mutex<DataStore>,
    snapshot_path: Option<PathBuf>,
    clock: Clock,
}

impl FitnessService {
    /// A service with no backing file
    pub fn in_memory() -> Self {
        Self::from_store(DataStore::new(), None)
    }

    /// Open (or start) the store snapshot at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let store = DataStore::load(&path)?;
        Ok(Self::from_store(store, Some(path)))
    }

    fn from_store(store: DataStore, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            store: Mutex::new(store),
            snapshot_path,
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the timestamp source used for `created_at` and entry dates
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// A copy of the current store contents
    pub fn snapshot(&self) -> DataStore {
        self.lock().clone()
    }

    /// Seed the default library if the store holds no records at all
    ///
    /// Returns the number of exercises created.
    pub fn seed_if_empty(&self) -> Result<usize> {
        self.mutate("seed_if_empty", |store, _| {
            if !store.is_empty() {
                return Ok(0);
            }
            store
                .seed_exercises(catalog::default_library())
                .map(|ids| ids.len())
        })
    }

    // A panic while holding the lock cannot leave a half-applied mutation,
    // so a poisoned store is still consistent.
    fn lock(&self) -> MutexGuard<'_, DataStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&DataStore) -> T,
    {
        let guard = self.lock();
        f(&guard)
    }

    fn mutate<T, F>(&self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut DataStore, DateTime<Utc>) -> Result<T>,
    {
        let mut guard = self.lock();
        let now = (self.clock)();

        let result = match &self.snapshot_path {
            None => f(&mut guard, now),
            Some(path) => {
                let mut working = guard.clone();
                match f(&mut working, now) {
                    Ok(value) => working.save(path).map(|()| {
                        *guard = working;
                        value
                    }),
                    Err(e) => Err(e),
                }
            }
        };

        match &result {
            Ok(_) => tracing::debug!("{} committed", op),
            Err(e) => tracing::warn!("{} rejected: {}", op, e),
        }
        result
    }
}

impl FitnessApi for FitnessService {
    fn create_exercise(&self, draft: ExerciseDraft) -> Result<ExerciseId> {
        self.mutate("create_exercise", |store, _| store.create_exercise(draft))
    }

    fn update_exercise(&self, id: ExerciseId, draft: ExerciseDraft) -> Result<()> {
        self.mutate("update_exercise", |store, _| store.update_exercise(id, draft))
    }

    fn delete_exercise(&self, id: ExerciseId) -> Result<()> {
        self.mutate("delete_exercise", |store, _| store.delete_exercise(id))
    }

    fn get_exercise(&self, id: ExerciseId) -> Result<Exercise> {
        self.read(|store| store.get_exercise(id).cloned())
    }

    fn get_all_exercises_sorted(&self) -> Result<Vec<Exercise>> {
        Ok(self.read(DataStore::get_all_exercises_sorted))
    }

    fn filter_exercises_by_equipment_type(&self, equipment_type: &str) -> Result<Vec<Exercise>> {
        Ok(self.read(|store| store.filter_exercises_by_equipment_type(equipment_type)))
    }

    fn filter_exercises_by_muscle_group(&self, muscle_group: &str) -> Result<Vec<Exercise>> {
        Ok(self.read(|store| store.filter_exercises_by_muscle_group(muscle_group)))
    }

    fn seed_exercises(&self) -> Result<Vec<ExerciseId>> {
        self.mutate("seed_exercises", |store, _| {
            store.seed_exercises(catalog::default_library())
        })
    }

    fn create_workout(&self, name: &str, exercise_ids: Vec<ExerciseId>) -> Result<WorkoutId> {
        self.mutate("create_workout", |store, now| {
            store.create_workout(name, exercise_ids, now)
        })
    }

    fn update_workout(
        &self,
        id: WorkoutId,
        name: &str,
        exercise_ids: Vec<ExerciseId>,
    ) -> Result<()> {
        self.mutate("update_workout", |store, _| {
            store.update_workout(id, name, exercise_ids)
        })
    }

    fn delete_workout(&self, id: WorkoutId) -> Result<()> {
        self.mutate("delete_workout", |store, _| store.delete_workout(id))
    }

    fn get_workout(&self, id: WorkoutId) -> Result<Workout> {
        self.read(|store| store.get_workout(id).cloned())
    }

    fn list_workouts(&self) -> Result<Vec<Workout>> {
        Ok(self.read(DataStore::list_workouts))
    }

    fn resolve_workout_exercises(&self, id: WorkoutId) -> Result<Vec<ExerciseSlot>> {
        self.read(|store| store.resolve_workout_exercises(id))
    }

    fn log_weight_entry(&self, draft: EntryDraft) -> Result<EntryId> {
        self.mutate("log_weight_entry", |store, now| {
            store.log_weight_entry(draft, now)
        })
    }

    fn get_weight_progress(&self, exercise_id: ExerciseId) -> Result<Vec<WeightEntry>> {
        Ok(self.read(|store| store.get_weight_progress(exercise_id)))
    }

    fn list_weight_entries(&self) -> Result<Vec<WeightEntry>> {
        Ok(self.read(|store| store.list_weight_entries().to_vec()))
    }
}
