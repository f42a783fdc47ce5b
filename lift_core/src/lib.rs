#![forbid(unsafe_code)]

//! Core data model and services for the lift weight-training tracker.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, weight entries)
//! - The data store and the query/mutation service over it
//! - A client-side query cache with explicit invalidation
//! - Persistence (JSON snapshot, CSV export)
//! - Progress analysis

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod persistence;
pub mod service;
pub mod cache;
pub mod progress;
pub mod export;

// Re-export commonly used types
pub use error::{Error, RecordKind, Result};
pub use types::*;
pub use config::Config;
pub use store::DataStore;
pub use persistence::StoreLock;
pub use service::{FitnessApi, FitnessService};
pub use cache::{CachedClient, Mutation, QueryCache, QueryKey};
pub use progress::{newest_first, with_trends, ProgressSummary, Trend};
pub use export::export_progress_csv;
