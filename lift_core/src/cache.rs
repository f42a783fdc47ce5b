//! Client-side query cache with explicit invalidation.
//!
//! Reads are cached under a [`QueryKey`] naming the operation and its
//! arguments. Every successful mutation is described by a [`Mutation`],
//! which decides exactly which keys it can affect. The cache is a plain
//! value owned by whoever needs it, never global state.

use crate::service::FitnessApi;
use crate::types::*;
use crate::Result;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Identity of a cached read: operation plus arguments
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AllExercises,
    ExercisesByEquipment(String),
    ExercisesByMuscle(String),
    Exercise(ExerciseId),
    Workouts,
    Workout(WorkoutId),
    WorkoutExercises(WorkoutId),
    Progress(ExerciseId),
    WeightLog,
}

impl QueryKey {
    fn depends_on_exercises(&self) -> bool {
        matches!(
            self,
            QueryKey::AllExercises
                | QueryKey::ExercisesByEquipment(_)
                | QueryKey::ExercisesByMuscle(_)
                | QueryKey::WorkoutExercises(_)
        )
    }
}

/// A successful mutation, as seen by the cache
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    ExerciseCreated(ExerciseId),
    ExerciseUpdated(ExerciseId),
    ExerciseDeleted(ExerciseId),
    ExercisesSeeded,
    WorkoutCreated(WorkoutId),
    WorkoutUpdated(WorkoutId),
    WorkoutDeleted(WorkoutId),
    WeightLogged { exercise_id: ExerciseId },
}

impl Mutation {
    /// Whether a cached read under `key` may be stale after this mutation
    pub fn invalidates(&self, key: &QueryKey) -> bool {
        match self {
            Mutation::ExerciseCreated(id)
            | Mutation::ExerciseUpdated(id)
            | Mutation::ExerciseDeleted(id) => {
                key.depends_on_exercises() || *key == QueryKey::Exercise(*id)
            }
            Mutation::ExercisesSeeded => {
                key.depends_on_exercises() || matches!(key, QueryKey::Exercise(_))
            }
            Mutation::WorkoutCreated(_) => *key == QueryKey::Workouts,
            Mutation::WorkoutUpdated(id) | Mutation::WorkoutDeleted(id) => match key {
                QueryKey::Workouts => true,
                QueryKey::Workout(w) | QueryKey::WorkoutExercises(w) => w == id,
                _ => false,
            },
            Mutation::WeightLogged { exercise_id } => match key {
                QueryKey::Progress(e) => e == exercise_id,
                QueryKey::WeightLog => true,
                _ => false,
            },
        }
    }
}

/// A cached read result
#[derive(Clone, Debug, PartialEq)]
pub enum CachedValue {
    Exercise(Exercise),
    Exercises(Vec<Exercise>),
    Workout(Workout),
    Workouts(Vec<Workout>),
    Slots(Vec<ExerciseSlot>),
    Entries(Vec<WeightEntry>),
}

/// Conversion between a read's result type and [`CachedValue`]
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedValue {
                CachedValue::$variant(self)
            }

            fn from_cached(value: &CachedValue) -> Option<Self> {
                match value {
                    CachedValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(Exercise, Exercise);
cacheable!(Vec<Exercise>, Exercises);
cacheable!(Workout, Workout);
cacheable!(Vec<Workout>, Workouts);
cacheable!(Vec<ExerciseSlot>, Slots);
cacheable!(Vec<WeightEntry>, Entries);

/// Key → result map with hit/miss accounting
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CachedValue>,
    hits: u64,
    misses: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Cacheable>(&mut self, key: &QueryKey) -> Option<T> {
        match self.entries.get(key).and_then(T::from_cached) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert<T: Cacheable>(&mut self, key: QueryKey, value: T) {
        self.entries.insert(key, value.into_cached());
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every key the mutation may have affected
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&mut self, mutation: &Mutation) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !mutation.invalidates(key));
        let removed = before - self.entries.len();
        tracing::debug!("{:?} invalidated {} cached queries", mutation, removed);
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// A [`FitnessApi`] that answers reads from a [`QueryCache`]
///
/// The cache lock is held across each backend call, so a read can never
/// refill the cache with data older than a mutation that has already
/// invalidated it. Failed calls are not cached and invalidate nothing.
pub struct CachedClient<A: FitnessApi> {
    api: A,
    cache: Mutex<QueryCache>,
}

impl<A: FitnessApi> CachedClient<A> {
    pub fn new(api: A) -> Self {
        Self::with_cache(api, QueryCache::new())
    }

    pub fn with_cache(api: A, cache: QueryCache) -> Self {
        Self {
            api,
            cache: Mutex::new(cache),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run `f` with the cache locked (for inspection in tests and tooling)
    pub fn with_cache_ref<T>(&self, f: impl FnOnce(&QueryCache) -> T) -> T {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, QueryCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn query<T, F>(&self, key: QueryKey, load: F) -> Result<T>
    where
        T: Cacheable,
        F: FnOnce(&A) -> Result<T>,
    {
        let mut cache = self.lock();
        if let Some(value) = cache.get(&key) {
            return Ok(value);
        }
        let value = load(&self.api)?;
        cache.insert(key, value.clone());
        Ok(value)
    }

    fn mutate<T, F, M>(&self, call: F, describe: M) -> Result<T>
    where
        F: FnOnce(&A) -> Result<T>,
        M: FnOnce(&T) -> Mutation,
    {
        let mut cache = self.lock();
        let value = call(&self.api)?;
        cache.invalidate(&describe(&value));
        Ok(value)
    }
}

impl<A: FitnessApi> FitnessApi for CachedClient<A> {
    fn create_exercise(&self, draft: ExerciseDraft) -> Result<ExerciseId> {
        self.mutate(|api| api.create_exercise(draft), |id| Mutation::ExerciseCreated(*id))
    }

    fn update_exercise(&self, id: ExerciseId, draft: ExerciseDraft) -> Result<()> {
        self.mutate(
            |api| api.update_exercise(id, draft),
            |_| Mutation::ExerciseUpdated(id),
        )
    }

    fn delete_exercise(&self, id: ExerciseId) -> Result<()> {
        self.mutate(|api| api.delete_exercise(id), |_| Mutation::ExerciseDeleted(id))
    }

    fn get_exercise(&self, id: ExerciseId) -> Result<Exercise> {
        self.query(QueryKey::Exercise(id), |api| api.get_exercise(id))
    }

    fn get_all_exercises_sorted(&self) -> Result<Vec<Exercise>> {
        self.query(QueryKey::AllExercises, |api| api.get_all_exercises_sorted())
    }

    fn filter_exercises_by_equipment_type(&self, equipment_type: &str) -> Result<Vec<Exercise>> {
        self.query(
            QueryKey::ExercisesByEquipment(equipment_type.to_string()),
            |api| api.filter_exercises_by_equipment_type(equipment_type),
        )
    }

    fn filter_exercises_by_muscle_group(&self, muscle_group: &str) -> Result<Vec<Exercise>> {
        self.query(
            QueryKey::ExercisesByMuscle(muscle_group.to_string()),
            |api| api.filter_exercises_by_muscle_group(muscle_group),
        )
    }

    fn seed_exercises(&self) -> Result<Vec<ExerciseId>> {
        self.mutate(|api| api.seed_exercises(), |_| Mutation::ExercisesSeeded)
    }

    fn create_workout(&self, name: &str, exercise_ids: Vec<ExerciseId>) -> Result<WorkoutId> {
        self.mutate(
            |api| api.create_workout(name, exercise_ids),
            |id| Mutation::WorkoutCreated(*id),
        )
    }

    fn update_workout(
        &self,
        id: WorkoutId,
        name: &str,
        exercise_ids: Vec<ExerciseId>,
    ) -> Result<()> {
        self.mutate(
            |api| api.update_workout(id, name, exercise_ids),
            |_| Mutation::WorkoutUpdated(id),
        )
    }

    fn delete_workout(&self, id: WorkoutId) -> Result<()> {
        self.mutate(|api| api.delete_workout(id), |_| Mutation::WorkoutDeleted(id))
    }

    fn get_workout(&self, id: WorkoutId) -> Result<Workout> {
        self.query(QueryKey::Workout(id), |api| api.get_workout(id))
    }

    fn list_workouts(&self) -> Result<Vec<Workout>> {
        self.query(QueryKey::Workouts, |api| api.list_workouts())
    }

    fn resolve_workout_exercises(&self, id: WorkoutId) -> Result<Vec<ExerciseSlot>> {
        self.query(QueryKey::WorkoutExercises(id), |api| {
            api.resolve_workout_exercises(id)
        })
    }

    fn log_weight_entry(&self, draft: EntryDraft) -> Result<EntryId> {
        let exercise_id = draft.exercise_id;
        self.mutate(
            |api| api.log_weight_entry(draft),
            |_| Mutation::WeightLogged { exercise_id },
        )
    }

    fn get_weight_progress(&self, exercise_id: ExerciseId) -> Result<Vec<WeightEntry>> {
        self.query(QueryKey::Progress(exercise_id), |api| {
            api.get_weight_progress(exercise_id)
        })
    }

    fn list_weight_entries(&self) -> Result<Vec<WeightEntry>> {
        self.query(QueryKey::WeightLog, |api| api.list_weight_entries())
    }
}
