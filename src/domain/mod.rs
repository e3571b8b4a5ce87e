//! Domain layer for the zroster plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP plumbing.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`employee`]: Employee record, status, and draft payloads

pub mod employee;
pub mod error;

pub use employee::{format_usd, parse_join_date, Employee, EmployeeDraft, EmployeeId, EmployeeStatus};
pub use error::{Result, RosterError};
