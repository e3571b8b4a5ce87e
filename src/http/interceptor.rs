//! Loading-aware wrapper around every outgoing request.
//!
//! [`RequestInterceptor::intercept`] is the single entry point for building a
//! dispatchable request and [`RequestInterceptor::settle`] the single entry
//! point for its result. Between them the interceptor owns the
//! [`LoadingTracker`] and guarantees one `begin()` and one `end()` per request.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::rc::Rc;

use crate::http::errors::ApiError;
use crate::http::request::{HttpMethod, HttpRequest, HttpResponse, RequestId, REQUEST_ID_KEY};
use crate::infrastructure::Clock;
use crate::loading::{EndOnDrop, LoadingTracker};

/// Default value of the `X-Requested-With` header.
pub const DEFAULT_CLIENT_ID: &str = "XMLHttpRequest";

#[derive(Debug)]
struct InFlight {
    method: HttpMethod,
    url: String,
    started_at: DateTime<Utc>,
    generation: u64,
}

pub struct RequestInterceptor {
    loading: LoadingTracker,
    pending: HashMap<RequestId, InFlight>,
    next_id: u64,
    generation: u64,
    client_id: String,
    clock: Rc<dyn Clock>,
}

impl RequestInterceptor {
    #[must_use]
    pub fn new(client_id: impl Into<String>, clock: Rc<dyn Clock>) -> Self {
        Self {
            loading: LoadingTracker::new(),
            pending: HashMap::new(),
            next_id: 1,
            generation: 0,
            client_id: client_id.into(),
            clock,
        }
    }

    /// Starts tracking a request and returns it with standard headers and an id.
    pub fn intercept(&mut self, mut request: HttpRequest) -> HttpRequest {
        self.loading.begin();

        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        request
            .headers
            .insert("X-Requested-With".to_string(), self.client_id.clone());

        let id = RequestId(self.next_id);
        self.next_id += 1;
        request
            .context
            .insert(REQUEST_ID_KEY.to_string(), id.0.to_string());

        self.pending.insert(
            id,
            InFlight {
                method: request.method,
                url: request.url.clone(),
                started_at: self.clock.now(),
                generation: self.generation,
            },
        );

        tracing::info!(
            request_id = %id,
            method = %request.method,
            url = %request.url,
            headers = ?request.headers.keys().collect::<Vec<_>>(),
            body_bytes = request.body.len(),
            in_flight = self.loading.in_flight(),
            "http request"
        );

        request
    }

    /// Resolves a completed request.
    ///
    /// Returns `None` for responses that carry no id or an id this interceptor
    /// is not waiting on; those never touch the loading count. Failures come
    /// back as [`ApiError`] with a user-facing message.
    pub fn settle(&mut self, response: HttpResponse) -> Option<(RequestId, Result<HttpResponse, ApiError>)> {
        let Some(id) = response.request_id() else {
            tracing::warn!(status = response.status, "response without request id");
            return None;
        };
        let Some(flight) = self.pending.remove(&id) else {
            tracing::warn!(request_id = %id, status = response.status, "response for unknown request");
            return None;
        };

        let _end = (flight.generation == self.generation).then(|| EndOnDrop::new(&mut self.loading));
        let duration_ms = (self.clock.now() - flight.started_at).num_milliseconds();

        if response.is_success() {
            tracing::info!(
                request_id = %id,
                method = %flight.method,
                url = %flight.url,
                status = response.status,
                duration_ms,
                body_bytes = response.body.len(),
                "http response"
            );
            Some((id, Ok(response)))
        } else {
            let error = ApiError::from_response(&flight.url, &response);
            tracing::warn!(
                request_id = %id,
                method = %flight.method,
                url = %flight.url,
                status = response.status,
                status_text = %error.status_text,
                duration_ms,
                user_message = %error.user_message,
                "http error"
            );
            Some((id, Err(error)))
        }
    }

    /// Clears the loading state and detaches every request in flight.
    ///
    /// Detached requests still settle normally but no longer decrement the count.
    pub fn force_clear(&mut self) {
        tracing::info!(detached = self.pending.len(), "force clearing requests");
        self.generation += 1;
        self.loading.force_clear();
    }

    #[must_use]
    pub const fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    /// Mutable access for registering loading observers.
    pub fn loading_mut(&mut self) -> &mut LoadingTracker {
        &mut self.loading
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Requests dispatched and not yet settled, detached ones included.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl std::fmt::Debug for RequestInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestInterceptor")
            .field("loading", &self.loading)
            .field("pending", &self.pending)
            .field("generation", &self.generation)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ManualClock;
    use chrono::Duration;
    use std::collections::BTreeMap;

    fn interceptor() -> (RequestInterceptor, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::default());
        (RequestInterceptor::new(DEFAULT_CLIENT_ID, clock.clone()), clock)
    }

    fn reply(request: &HttpRequest, status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: BTreeMap::new(),
            body: body.as_bytes().to_vec(),
            context: request.context.clone(),
        }
    }

    #[test]
    fn stamps_headers_and_id() {
        let (mut interceptor, _) = interceptor();
        let request = interceptor.intercept(HttpRequest::new(HttpMethod::Get, "http://h/users"));

        assert_eq!(request.headers["Content-Type"], "application/json");
        assert_eq!(request.headers["X-Requested-With"], "XMLHttpRequest");
        assert_eq!(request.request_id(), Some(RequestId(1)));
        assert!(interceptor.is_loading());
    }

    #[test]
    fn overlapping_requests_end_once_each() {
        let (mut interceptor, clock) = interceptor();
        let first = interceptor.intercept(HttpRequest::new(HttpMethod::Get, "http://h/users"));
        let second = interceptor.intercept(HttpRequest::new(HttpMethod::Delete, "http://h/users/3"));
        clock.advance(Duration::milliseconds(40));

        let (id, result) = interceptor.settle(reply(&second, 500, "")).unwrap();
        assert_eq!(id, RequestId(2));
        assert!(result.is_err());
        assert!(interceptor.is_loading());

        let (_, result) = interceptor.settle(reply(&first, 200, "[]")).unwrap();
        assert!(result.is_ok());
        assert!(!interceptor.is_loading());
        assert_eq!(interceptor.loading().in_flight(), 0);
    }

    #[test]
    fn duplicate_and_unknown_responses_are_ignored() {
        let (mut interceptor, _) = interceptor();
        let request = interceptor.intercept(HttpRequest::new(HttpMethod::Get, "http://h/users"));
        let other = interceptor.intercept(HttpRequest::new(HttpMethod::Get, "http://h/users/1"));

        assert!(interceptor.settle(reply(&request, 200, "[]")).is_some());
        assert!(interceptor.settle(reply(&request, 200, "[]")).is_none());
        assert!(interceptor
            .settle(HttpResponse {
                status: 200,
                headers: BTreeMap::new(),
                body: Vec::new(),
                context: BTreeMap::new(),
            })
            .is_none());

        assert_eq!(interceptor.loading().in_flight(), 1);
        assert!(interceptor.settle(reply(&other, 404, "")).is_some());
        assert!(!interceptor.is_loading());
    }

    #[test]
    fn force_clear_detaches_requests_in_flight() {
        let (mut interceptor, _) = interceptor();
        let stale = interceptor.intercept(HttpRequest::new(HttpMethod::Get, "http://h/users"));

        interceptor.force_clear();
        assert!(!interceptor.is_loading());

        let fresh = interceptor.intercept(HttpRequest::new(HttpMethod::Get, "http://h/users"));
        let (_, result) = interceptor.settle(reply(&stale, 200, "[]")).unwrap();
        assert!(result.is_ok());
        assert!(interceptor.is_loading(), "stale completion must not end the fresh request");

        interceptor.settle(reply(&fresh, 200, "[]"));
        assert!(!interceptor.is_loading());
        assert_eq!(interceptor.pending_count(), 0);
    }
}
