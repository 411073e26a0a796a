//! Failure taxonomy for assertion-client calls.

use parkcheck_model::ModelError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failures raised by assertion-client calls.
///
/// `Status`, `Payload`, and `Shape` mean the server answered and the
/// answer violated the expected contract. The remaining variants are
/// faults underneath or inside the harness: the transport broke, or the
/// story handed the client a contract-violating expectation.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Wrong HTTP status
    #[error("{operation}: expected status {expected}, got {received}")]
    Status {
        operation: String,
        expected: u16,
        received: u16,
    },

    /// Wrong payload, rendered as pretty-printed JSON both ways
    #[error("{operation}: payload mismatch\nexpected:\n{expected}\nreceived:\n{received}")]
    Payload {
        operation: String,
        expected: String,
        received: String,
    },

    /// Right status, structurally wrong payload
    #[error("{operation}: {detail}")]
    Shape { operation: String, detail: String },

    /// Network or body-decode failure underneath the call
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// An expectation value that would not encode to JSON
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),

    /// The story built a broken expectation value
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CheckError {
    /// Creates a status-code mismatch.
    pub(crate) fn status(operation: &str, expected: StatusCode, received: StatusCode) -> Self {
        Self::Status {
            operation: operation.to_string(),
            expected: expected.as_u16(),
            received: received.as_u16(),
        }
    }

    /// Creates a payload mismatch with both sides rendered.
    pub(crate) fn payload(operation: &str, expected: &Value, received: &Value) -> Self {
        Self::Payload {
            operation: operation.to_string(),
            expected: render(expected),
            received: render(received),
        }
    }

    /// Creates a payload-shape violation.
    pub(crate) fn shape(operation: &str, detail: impl Into<String>) -> Self {
        Self::Shape {
            operation: operation.to_string(),
            detail: detail.into(),
        }
    }

    /// True when the server answered and the answer broke the expected
    /// contract; false for transport faults and harness-side mistakes.
    /// Runners report the former as FAIL and the latter as ERROR.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            CheckError::Status { .. } | CheckError::Payload { .. } | CheckError::Shape { .. }
        )
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
