//! This crate provides the core of a single-user habit tracker.
//!
//! Each tracked [`Goal`] owns a sparse per-day log ([`DayLog`]) with a three-state toggle
//! (untouched → completed → missed → untouched). The [`grid`] module builds a week-aligned
//! calendar for a year, and the [`render`] module projects a goal onto it as a GitHub-style
//! contribution grid, along with its [`Stats`] (counts and current streak).
//!
//! The [`GoalStore`] owns the ordered goal collection and persists it through any
//! [`RecordSource`](traits::RecordSource). \
//! A client for a hosted record store is available in the [`client`] module, and the
//! [`memory_source`] module provides an in-memory source for tests and offline runs. \
//! The [`app`] module maps user gestures to store operations, one [`Command`] per gesture.

pub mod day_log;
pub use day_log::{DayLog, DayStatus};
pub mod grid;
pub mod stats;
pub use stats::Stats;
pub mod render;
mod goal;
pub use goal::{Goal, GoalId, GoalRecord, StoredGoal, SyncStatus, UserId};
pub mod errors;
pub use errors::StoreError;
pub mod traits;
pub mod store;
pub use store::GoalStore;
pub mod app;
pub use app::{App, Command};

pub mod client;
pub mod auth;
pub mod prefs;
pub mod memory_source;
pub mod mock_behaviour;

pub mod resource;
pub mod config;
pub mod utils;
