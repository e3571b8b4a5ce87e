//! Loading-state coordination.
//!
//! - [`tracker`]: in-flight request counter and loading signal publisher

pub mod tracker;

pub use tracker::{EndOnDrop, LoadingTracker, SubscriptionId};
