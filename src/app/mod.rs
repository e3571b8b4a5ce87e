//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the table, HTTP and
//! notification layers.
//!
//! ```text
//! Key / Timer / WebRequestResult → Event → handle_event → State Mutations → Actions
//!                                                ↑                            ↓
//!                                                └──── web_request results ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Add/edit employee form with validation
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{EmployeeForm, Field, FormMode};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, PendingDelete, SearchFocus};
pub use state::AppState;
