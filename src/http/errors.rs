//! Uniform HTTP error shape.
//!
//! Every failed response is rewritten into an [`ApiError`]: the server's JSON
//! payload (or `{}` when there is none) with an injected `userMessage` field,
//! plus the status, status text and url. The message is chosen from a fixed
//! table so the UI never has to interpret raw status codes.

use serde_json::{Map, Value};
use std::fmt;

use crate::http::request::HttpResponse;

/// Coarse classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never reached a server (status 0).
    Transport,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    Server,
    Unavailable,
    Other,
}

impl ErrorKind {
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            0 => Self::Transport,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::Validation,
            503 => Self::Unavailable,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// A failed request, rewritten for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: u16,
    pub status_text: String,
    pub url: String,
    /// Original payload with `userMessage` injected. Always a JSON object.
    pub error: Value,
    pub user_message: String,
}

impl ApiError {
    /// Rewrites a non-2xx response.
    #[must_use]
    pub fn from_response(url: &str, response: &HttpResponse) -> Self {
        Self::from_parts(url, response.status, &response.body)
    }

    /// Rewrites a failure from its raw status and body.
    #[must_use]
    pub fn from_parts(url: &str, status: u16, body: &[u8]) -> Self {
        let status_text = reason_phrase(status).to_string();
        let mut payload = payload_object(body);
        let user_message = user_message(status, &status_text, url, &payload);
        payload.insert("userMessage".to_string(), Value::String(user_message.clone()));

        Self {
            kind: ErrorKind::from_status(status),
            status,
            status_text,
            url: url.to_string(),
            error: Value::Object(payload),
            user_message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message)
    }
}

impl std::error::Error for ApiError {}

fn payload_object(body: &[u8]) -> Map<String, Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Map::new();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => Map::from_iter([("error".to_string(), other)]),
        Err(_) => Map::from_iter([(
            "error".to_string(),
            Value::String(String::from_utf8_lossy(body).into_owned()),
        )]),
    }
}

fn user_message(status: u16, status_text: &str, url: &str, payload: &Map<String, Value>) -> String {
    let fixed = match status {
        0 => Some("Unable to connect to the server. Please check your internet connection."),
        400 => Some("Bad request. Please check your input data."),
        401 => Some("Unauthorized. Please log in again."),
        403 => Some("Forbidden. You do not have permission to access this resource."),
        404 => Some("The requested resource was not found."),
        500 => Some("Internal server error. Please try again later."),
        503 => Some("Service unavailable. Please try again later."),
        _ => None,
    };
    if let Some(message) = fixed {
        return message.to_string();
    }

    let server_message = payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty());
    if let Some(message) = server_message {
        return message.to_string();
    }

    match status {
        409 => "Conflict. Resource already exists.".to_string(),
        422 => "Validation failed. Please check your input.".to_string(),
        _ => format!("Http failure response for {url}: {status} {status_text}")
            .trim_end()
            .to_string(),
    }
}

/// Standard reason phrase, or an empty string for unlisted codes.
#[must_use]
pub const fn reason_phrase(status: u16) -> &'static str {
    match status {
        0 => "Unknown Error",
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        413 => "Payload Too Large",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:3000/users/9";

    #[test]
    fn fixed_messages_override_server_text() {
        let err = ApiError::from_parts(URL, 404, br#"{"message":"nope"}"#);

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.user_message, "The requested resource was not found.");
        assert_eq!(err.error["message"], "nope");
        assert_eq!(err.error["userMessage"], "The requested resource was not found.");
    }

    #[test]
    fn transport_failure_has_connectivity_message() {
        let err = ApiError::from_parts(URL, 0, b"");

        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(err.user_message.starts_with("Unable to connect"));
        assert_eq!(err.status_text, "Unknown Error");
    }

    #[test]
    fn default_branch_prefers_server_message() {
        let err = ApiError::from_parts(URL, 418, br#"{"message":"I am a teapot"}"#);
        assert_eq!(err.user_message, "I am a teapot");

        let conflict = ApiError::from_parts(URL, 409, b"{}");
        assert_eq!(conflict.user_message, "Conflict. Resource already exists.");

        let invalid = ApiError::from_parts(URL, 422, b"");
        assert_eq!(invalid.user_message, "Validation failed. Please check your input.");

        let gateway = ApiError::from_parts(URL, 502, b"<html>bad gateway</html>");
        assert_eq!(gateway.kind, ErrorKind::Server);
        assert_eq!(
            gateway.user_message,
            "Http failure response for http://localhost:3000/users/9: 502 Bad Gateway"
        );
        assert_eq!(gateway.error["error"], "<html>bad gateway</html>");
    }

    #[test]
    fn every_status_yields_a_message() {
        for status in [0, 301, 400, 401, 403, 404, 409, 418, 422, 429, 500, 502, 503, 599, 999] {
            let err = ApiError::from_parts(URL, status, b"[]");
            assert!(!err.user_message.is_empty(), "status {status}");
            assert!(err.error.is_object());
            assert_eq!(err.error["userMessage"], err.user_message.as_str());
        }
    }
}
