//! Storage layer for persisted plugin state.
//!
//! The only state zroster persists is the optional bearer token used by the
//! authenticated API endpoint.
//!
//! # Modules
//!
//! - `backend`: [`TokenStore`] trait abstraction
//! - `token`: JSON file and in-memory implementations

pub mod backend;
pub mod token;

pub use backend::TokenStore;
pub use token::{FileTokenStore, MemoryTokenStore};
