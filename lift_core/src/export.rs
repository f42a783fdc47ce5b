//! CSV export of the weight log.

use crate::types::{Exercise, ExerciseId, WeightEntry};
use crate::Result;
use std::collections::HashMap;
use std::path::Path;

/// Exercise column value for entries whose exercise has been deleted
pub const MISSING_EXERCISE: &str = "(not found)";

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    entry_id: u64,
    exercise_id: u64,
    exercise: &'a str,
    weight: f64,
    reps: u32,
    sets: u32,
    volume: f64,
    date: String,
    workout_id: Option<u64>,
}

/// Write weight entries to a CSV file, replacing any existing file
///
/// Rows keep the order of `entries`. Returns the number of rows written.
pub fn export_progress_csv(
    entries: &[WeightEntry],
    exercises: &[Exercise],
    path: &Path,
) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let names: HashMap<ExerciseId, &str> = exercises
        .iter()
        .map(|e| (e.id, e.name.as_str()))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    for entry in entries {
        writer.serialize(CsvRow {
            entry_id: entry.id.0,
            exercise_id: entry.exercise_id.0,
            exercise: names
                .get(&entry.exercise_id)
                .copied()
                .unwrap_or(MISSING_EXERCISE),
            weight: entry.weight,
            reps: entry.reps,
            sets: entry.sets,
            volume: entry.volume(),
            date: entry.date.to_rfc3339(),
            workout_id: entry.workout_id.map(|w| w.0),
        })?;
    }

    writer.flush()?;
    tracing::info!("Exported {} weight entries to {:?}", entries.len(), path);
    Ok(entries.len())
}
