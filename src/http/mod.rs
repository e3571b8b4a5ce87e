//! HTTP plumbing for the users REST service.
//!
//! Zellij plugins cannot block on I/O: a request is handed to the host with
//! `web_request` and its result comes back later as an event. This module
//! models both halves as plain values so the request lifecycle can be driven
//! and tested without the host.
//!
//! # Modules
//!
//! - `request`: [`HttpRequest`] / [`HttpResponse`] value types
//! - `errors`: [`ApiError`] and the status-to-message table
//! - `interceptor`: [`RequestInterceptor`], loading accounting around every call
//! - `api`: [`ApiClient`], the users service built on the interceptor

pub mod api;
pub mod errors;
pub mod interceptor;
pub mod request;

pub use api::{ApiClient, ApiOperation, ApiOutcome, Completion};
pub use errors::{ApiError, ErrorKind};
pub use interceptor::RequestInterceptor;
pub use request::{HttpMethod, HttpRequest, HttpResponse, RequestId};
