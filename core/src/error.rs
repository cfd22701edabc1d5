//! Error types for the employee API client.
//!
//! # Design
//! Callers treat every failure the same way: the store records it and the
//! view shows its message. The variants only say where the failure came from.
//! `message()` is always a plain string no matter what the server sent back,
//! and the raw server body is kept next to it as a bounded `ErrorPayload`.

use std::fmt;

use thiserror::Error;

/// Upper bound, in bytes, on an error body kept in `ErrorPayload` and on
/// the message extracted from it.
pub const MAX_TEXT_PAYLOAD: usize = 4096;

/// Errors surfaced by `EmployeeClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        message: String,
        payload: Option<ErrorPayload>,
    },

    /// No response was obtained.
    #[error("request failed: {message}")]
    Transport { message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }

    /// Human-readable description, suitable for an error banner.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Server { message, .. } | ApiError::Transport { message } => message,
            ApiError::Deserialization(message) | ApiError::Serialization(message) => message,
        }
    }

    /// The raw server body, when the failure came from the server.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            ApiError::Server { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a `Server` error from a failed response body, falling back to
    /// `fallback` when the body carries no usable message.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let parsed = ErrorPayload::parse(body);
        let message = match parsed.as_ref().and_then(ErrorPayload::message) {
            Some(message) => truncate(&message, MAX_TEXT_PAYLOAD).to_string(),
            None => fallback.to_string(),
        };
        ApiError::Server {
            status,
            message,
            payload: parsed.map(|payload| payload.bounded(body)),
        }
    }
}

/// Raw error body returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// JSON body of at most `MAX_TEXT_PAYLOAD` bytes.
    Json(serde_json::Value),
    /// Non-JSON or oversized body, truncated to `MAX_TEXT_PAYLOAD` bytes.
    Text(String),
}

impl ErrorPayload {
    /// `None` for an empty or whitespace-only body.
    pub fn from_body(body: &str) -> Option<Self> {
        Self::parse(body).map(|payload| payload.bounded(body))
    }

    fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(body) {
            Ok(value) => Some(ErrorPayload::Json(value)),
            Err(_) => Some(ErrorPayload::Text(truncate(body, MAX_TEXT_PAYLOAD).to_string())),
        }
    }

    fn bounded(self, body: &str) -> Self {
        match self {
            ErrorPayload::Json(_) if body.len() > MAX_TEXT_PAYLOAD => {
                ErrorPayload::Text(truncate(body, MAX_TEXT_PAYLOAD).to_string())
            }
            payload => payload,
        }
    }

    /// Extract a display message.
    ///
    /// Looks for a string `error` field, then a string `message` field, then
    /// treats an object of strings as per-field validation messages. A bare
    /// JSON string or a text body is used as-is.
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorPayload::Text(text) => Some(text.trim().to_string()),
            ErrorPayload::Json(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                Some(s.clone())
            }
            ErrorPayload::Json(serde_json::Value::Object(map)) => {
                for key in ["error", "message"] {
                    if let Some(serde_json::Value::String(s)) = map.get(key) {
                        if !s.trim().is_empty() {
                            return Some(s.clone());
                        }
                    }
                }
                let mut fields: Vec<(&String, &str)> = map
                    .iter()
                    .filter_map(|(field, value)| value.as_str().map(|msg| (field, msg)))
                    .filter(|(_, msg)| !msg.trim().is_empty())
                    .collect();
                if fields.is_empty() {
                    return None;
                }
                fields.sort();
                let joined: Vec<String> = fields
                    .into_iter()
                    .map(|(field, msg)| format!("{field}: {msg}"))
                    .collect();
                Some(joined.join("; "))
            }
            ErrorPayload::Json(_) => None,
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{value}"),
            ErrorPayload::Text(text) => f.write_str(text),
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_wins() {
        let err = ApiError::from_response(
            404,
            r#"{"error":"Employee not found with id: 9"}"#,
            "Failed to delete employee",
        );
        assert_eq!(err.message(), "Employee not found with id: 9");
        assert_eq!(err.status(), Some(404));
        assert!(matches!(err.payload(), Some(ErrorPayload::Json(_))));
    }

    #[test]
    fn validation_map_is_joined_by_field() {
        let err = ApiError::from_response(
            400,
            r#"{"password":"must be at least 6 characters","email":"must be a well-formed email address"}"#,
            "Failed to add employee",
        );
        assert_eq!(
            err.message(),
            "email: must be a well-formed email address; password: must be at least 6 characters"
        );
    }

    #[test]
    fn empty_body_uses_fallback() {
        let err = ApiError::from_response(500, "", "Failed to fetch employees");
        assert_eq!(err.message(), "Failed to fetch employees");
        assert!(err.payload().is_none());
    }

    #[test]
    fn json_without_strings_uses_fallback() {
        let err = ApiError::from_response(500, r#"{"code":17}"#, "Failed to batch delete");
        assert_eq!(err.message(), "Failed to batch delete");
        assert!(err.payload().is_some());
    }

    #[test]
    fn text_body_is_bounded() {
        let body = "é".repeat(MAX_TEXT_PAYLOAD);
        let payload = ErrorPayload::from_body(&body).unwrap();
        match payload {
            ErrorPayload::Text(text) => assert!(text.len() <= MAX_TEXT_PAYLOAD),
            other => panic!("expected text payload, got {other:?}"),
        }
    }

    #[test]
    fn oversized_json_keeps_message_but_bounds_payload() {
        let detail = "x".repeat(400_000);
        let body = format!(r#"{{"error":"Employee not found with id: 3","detail":"{detail}"}}"#);
        let err = ApiError::from_response(404, &body, "Failed to fetch employees");

        assert_eq!(err.message(), "Employee not found with id: 3");
        match err.payload() {
            Some(ErrorPayload::Text(text)) => {
                assert_eq!(text.len(), MAX_TEXT_PAYLOAD);
                assert!(body.starts_with(text.as_str()));
            }
            other => panic!("expected truncated text payload, got {other:?}"),
        }
    }

    #[test]
    fn oversized_message_is_truncated() {
        let body = format!(r#"{{"message":"{}"}}"#, "y".repeat(10_000));
        let err = ApiError::from_response(500, &body, "Failed to add employee");
        assert_eq!(err.message().len(), MAX_TEXT_PAYLOAD);
    }

    #[test]
    fn small_json_payload_is_kept_as_json() {
        let payload = ErrorPayload::from_body(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(payload, ErrorPayload::Json(serde_json::json!({"error": "boom"})));
    }

    #[test]
    fn blank_error_field_falls_through() {
        let err = ApiError::from_response(500, r#"{"error":"  ","message":"Server exploded"}"#, "Failed to update employee");
        assert_eq!(err.message(), "Server exploded");

        let err = ApiError::from_response(500, r#"{"error":""}"#, "Failed to update employee");
        assert_eq!(err.message(), "Failed to update employee");
    }

    #[test]
    fn transport_error_has_message_but_no_payload() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.message(), "connection refused");
        assert!(err.payload().is_none());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
