//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides utilities for working with the Zellij plugin sandbox,
//! where the host filesystem is mounted under `/host`, and the wall clock the
//! rest of the plugin reads time from.

pub mod clock;
pub mod paths;

pub use clock::{Clock, ManualClock, SystemClock};
pub use paths::{expand_tilde, get_data_dir};
