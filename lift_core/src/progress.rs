//! Weight progress analysis.
//!
//! The store hands back entries in insertion order; everything here is the
//! presentation-side view of that history: newest-first ordering, the trend
//! between consecutive sessions, and a summary.

use crate::types::WeightEntry;

/// Change in weight relative to the previous (older) entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trend {
    Up(f64),
    Down(f64),
    Same,
}

impl Trend {
    pub fn between(previous: &WeightEntry, current: &WeightEntry) -> Self {
        if current.weight > previous.weight {
            Trend::Up(current.weight - previous.weight)
        } else if current.weight < previous.weight {
            Trend::Down(previous.weight - current.weight)
        } else {
            Trend::Same
        }
    }
}

/// Sort entries newest first
///
/// Entries sharing a date keep the most recently logged one first.
pub fn newest_first(mut entries: Vec<WeightEntry>) -> Vec<WeightEntry> {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    entries
}

/// Newest-first entries paired with their trend against the next older entry
///
/// The oldest entry has no trend.
pub fn with_trends(entries: Vec<WeightEntry>) -> Vec<(WeightEntry, Option<Trend>)> {
    let sorted = newest_first(entries);
    let trends: Vec<Option<Trend>> = (0..sorted.len())
        .map(|i| sorted.get(i + 1).map(|older| Trend::between(older, &sorted[i])))
        .collect();
    sorted.into_iter().zip(trends).collect()
}

/// Aggregate view of an exercise's history
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSummary {
    pub count: usize,
    pub first_weight: f64,
    pub latest_weight: f64,
    pub best_weight: f64,
    pub total_volume: f64,
}

impl ProgressSummary {
    /// Summarize entries; `None` when there is no history
    pub fn from_entries(entries: &[WeightEntry]) -> Option<Self> {
        let oldest = entries
            .iter()
            .min_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)))?;
        let newest = entries
            .iter()
            .max_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)))?;

        Some(ProgressSummary {
            count: entries.len(),
            first_weight: oldest.weight,
            latest_weight: newest.weight,
            best_weight: entries.iter().map(|e| e.weight).fold(f64::MIN, f64::max),
            total_volume: entries.iter().map(WeightEntry::volume).sum(),
        })
    }

    /// Latest minus first weight
    pub fn net_change(&self) -> f64 {
        self.latest_weight - self.first_weight
    }
}
