//! Outcome of a registration attempt.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response from one metadata registration attempt.
///
/// Delivery is best-effort, so a failed attempt is still a `RegisterResponse`
/// (with `success == false`), not an error. Callers that want to reconcile
/// orphaned blobs later can persist these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Unique identifier for this attempt.
    pub response_id: Uuid,
    /// Whether the endpoint acknowledged the record with a 2xx status.
    pub success: bool,
    /// HTTP status code returned by the endpoint, when one was received.
    pub status_code: Option<u16>,
    /// Error message when delivery failed.
    pub error: Option<String>,
    /// Round-trip time in milliseconds.
    pub response_time_ms: Option<u64>,
}

impl RegisterResponse {
    /// A registration the endpoint acknowledged.
    pub fn success(status_code: u16) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            success: true,
            status_code: Some(status_code),
            error: None,
            response_time_ms: None,
        }
    }

    /// A registration that did not reach the endpoint or was rejected.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            success: false,
            status_code: None,
            error: Some(error.into()),
            response_time_ms: None,
        }
    }

    /// Attach the HTTP status code.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attach the round-trip time.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.response_time_ms = Some(duration.as_millis() as u64);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_the_status_code() {
        let response = RegisterResponse::success(201);
        assert!(response.success);
        assert_eq!(response.status_code, Some(201));
        assert!(response.error.is_none());
    }

    #[test]
    fn failure_carries_the_error_text() {
        let response = RegisterResponse::failure("Connection failed").with_status_code(503);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Connection failed"));
        assert_eq!(response.status_code, Some(503));
    }

    #[test]
    fn duration_is_recorded_in_milliseconds() {
        let response = RegisterResponse::success(200).with_duration(Duration::from_millis(1500));
        assert_eq!(response.response_time_ms, Some(1500));
    }
}
