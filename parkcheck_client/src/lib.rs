//! HTTP assertion client for the park simulation server.
//!
//! One operation per endpoint: each call issues the request, checks the
//! status code first, then checks the payload under that endpoint's rule
//! (exact structural equality, a shape check, or order-insensitive
//! multiset equality for the dinosaur list). Mismatches come back as
//! [`CheckError`] values; [`CheckError::is_assertion`] tells the story
//! runner whether the server broke the contract or the harness hit a
//! fault of its own.

mod client;
mod error;

pub use client::ParkClient;
pub use error::CheckError;
