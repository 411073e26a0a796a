//! Expected-value domain model for the park simulation API.
//!
//! Everything in this crate is a pure value. Conformance stories build
//! these as literal expectations; the assertion client serializes them
//! into the exact wire format the server speaks and compares them against
//! live responses. Construction does no I/O and is deterministic; the
//! only fallible constructors are the ones whose invariants a story
//! author could violate ([`ResourceAdjustment::new`],
//! [`TurnResponse::new`]).

mod dinosaur;
mod error;
mod resources;
mod turn;

pub use dinosaur::{ranked_by_force, Dinosaur, Gender, Species};
pub use error::{ApiErrorKind, ModelError};
pub use resources::{ResourceAdjustment, ResourceBundle, ResourceSnapshot};
pub use turn::TurnResponse;
