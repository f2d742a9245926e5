//! Response envelope wrapping every API payload.

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::wire::null_as_default;

/// Envelope returned by the API around `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `"ok"` on success, `"error"` otherwise
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Human-readable error message, if the call failed
    #[serde(default)]
    pub error: Option<String>,
    /// Payload, present on success
    #[serde(default)]
    pub data: Option<T>,
    /// Numeric status code (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Create a successful envelope around `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
            data: Some(data),
            code: None,
        }
    }

    /// Create a failed envelope
    pub fn failure(message: impl Into<String>, code: Option<i64>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(message.into()),
            data: None,
            code,
        }
    }

    /// Check if the API reported success
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok") && self.error.is_none()
    }

    /// Unwrap the payload, turning an error status into [`GeneratorError::Api`].
    ///
    /// An `ok` envelope without `data` is also treated as a failure.
    pub fn into_result(self) -> Result<T, GeneratorError> {
        if !self.is_ok() {
            let message = self
                .error
                .unwrap_or_else(|| "no error message provided".to_string());
            return Err(GeneratorError::api(self.status, message));
        }
        self.data
            .ok_or_else(|| GeneratorError::api(self.status, "response contained no data"))
    }
}
