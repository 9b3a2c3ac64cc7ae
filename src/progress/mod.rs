//! Volunteer progress tracking
//!
//! Persisted completion state per speaker plus the serialized merge on top.

pub mod store;
pub mod tracker;

pub use store::{
    JsonProgressStore, MemoryProgressStore, ProgressMap, ProgressStore, VolunteerProgress,
};
pub use tracker::ProgressTracker;
