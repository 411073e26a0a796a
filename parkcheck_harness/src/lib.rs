//! Conformance harness for the park simulation server.
//!
//! Replays scripted stories against a running server over HTTP and
//! reports one outcome per story.

pub mod runner;
pub mod stories;

pub use runner::{StoryOutcome, StoryReport, StoryRunner};
pub use stories::StoryId;
