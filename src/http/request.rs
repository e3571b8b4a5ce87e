//! Request and response values exchanged with the plugin host.
//!
//! The host's `web_request` takes a context map that is echoed back verbatim
//! with the result. The interceptor stores the [`RequestId`] there under
//! [`REQUEST_ID_KEY`] to match results with the requests that caused them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::Result;

/// Context key carrying the request id through the host.
pub const REQUEST_ID_KEY: &str = "zroster_request_id";

/// Identifier assigned to a request by the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request, ready for `web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            context: BTreeMap::new(),
        }
    }

    /// Sets the body to the JSON encoding of `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Serialization`](crate::RosterError::Serialization)
    /// if `payload` cannot be encoded.
    pub fn with_json<T: Serialize>(mut self, payload: &T) -> Result<Self> {
        self.body = serde_json::to_vec(payload)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The id stamped by the interceptor, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        parse_request_id(&self.context)
    }
}

/// A completed request as reported by the host.
///
/// Status `0` means the request never reached a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Serialization`](crate::RosterError::Serialization)
    /// if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        parse_request_id(&self.context)
    }
}

fn parse_request_id(context: &BTreeMap<String, String>) -> Option<RequestId> {
    context.get(REQUEST_ID_KEY)?.parse().ok().map(RequestId)
}
