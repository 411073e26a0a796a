//! Turn advancement expectations.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Expected payload after advancing the simulation by one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    /// One-based turn counter
    pub turn_number: u32,
}

impl TurnResponse {
    /// Creates the expectation; the server's counter starts at 1, so a
    /// zero here is a broken story, not a comparison to make.
    pub fn new(turn_number: u32) -> Result<Self, ModelError> {
        if turn_number == 0 {
            return Err(ModelError::InvalidTurnNumber(turn_number));
        }
        Ok(Self { turn_number })
    }
}
