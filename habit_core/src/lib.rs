#![forbid(unsafe_code)]

//! Core domain model and business logic for Tiny Habits.
//!
//! This crate provides:
//! - Domain types (habits, completions, mood entries, preferences)
//! - The habit store and its key-value persistence
//! - Frequency evaluation and completion statistics
//! - Built-in templates and coach-style encouragements
//! - Configuration, logging and CSV export

pub mod types;
pub mod error;
pub mod id;
pub mod schedule;
pub mod stats;
pub mod storage;
pub mod store;
pub mod templates;
pub mod encouragement;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use id::generate_id;
pub use schedule::{calendar_day, is_scheduled, parse_day, parse_timestamp};
pub use stats::{progress_ratio, total_completed, total_scheduled, DailyProgress};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, STORAGE_KEY};
pub use store::HabitStore;
pub use templates::{find_template, HabitTemplate, HABIT_TEMPLATES};
pub use encouragement::random_encouragement;
pub use export::export_completions_csv;
pub use config::Config;
