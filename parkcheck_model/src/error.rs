//! Server error oracle values and model contract violations.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// The closed set of validation errors the server reports.
///
/// Each kind is a fixed code + description pair. Stories compare these
/// byte for byte as oracle values and never build them from runtime
/// data, so the variants carry no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Gender other than "m" or "f"
    InvalidGender,
    /// Weight of zero or below
    InvalidWeight,
    /// Species outside the supported ten
    InvalidSpecies,
    /// Second creation under an existing name
    DuplicateName,
    /// Non-positive delivery quantity
    InvalidResourceQuantity,
    /// Lookup of a name never created
    NonExistentName,
}

impl ApiErrorKind {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorKind::InvalidGender => "INVALID_GENDER",
            ApiErrorKind::InvalidWeight => "INVALID_WEIGHT",
            ApiErrorKind::InvalidSpecies => "INVALID_SPECIES",
            ApiErrorKind::DuplicateName => "DUPLICATE_NAME",
            ApiErrorKind::InvalidResourceQuantity => "INVALID_RESOURCE_QUANTITY",
            ApiErrorKind::NonExistentName => "NON_EXISTENT_NAME",
        }
    }

    /// Human-readable description, byte-exact as the server sends it.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorKind::InvalidGender => "The specified gender must be \"m\" or \"f\".",
            ApiErrorKind::InvalidWeight => "The specified weight must be greater than 0.",
            ApiErrorKind::InvalidSpecies => "The specified species is not supported.",
            ApiErrorKind::DuplicateName => "The specified name already exists and must be unique.",
            ApiErrorKind::InvalidResourceQuantity => "Resource quantities must be positive.",
            ApiErrorKind::NonExistentName => "The specified name does not exist.",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ApiErrorKind {
    /// Encodes as the server's error body: `{"error", "description"}`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut body = serializer.serialize_struct("ApiErrorKind", 2)?;
        body.serialize_field("error", self.code())?;
        body.serialize_field("description", self.description())?;
        body.end()
    }
}

/// Contract violations inside the harness's own expectation values.
///
/// These mean the story is broken, not the server; runners report them
/// as ERROR rather than FAIL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A delivery request with nothing in it
    #[error("resource adjustment must carry at least one quantity")]
    EmptyAdjustment,

    /// Turn counters are one-based
    #[error("turn number must be at least 1, got {0}")]
    InvalidTurnNumber(u32),
}
