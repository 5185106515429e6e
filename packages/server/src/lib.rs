//! CampusLink coordination server library.
//!
//! This library implements the video-call-request lifecycle (pending →
//! accepted → scheduled → active → completed) and the WebRTC signaling relay
//! that brokers offer/answer/ICE exchange between call participants.

pub mod domain;
pub mod infrastructure;
pub mod signaling;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{build_router, run};
