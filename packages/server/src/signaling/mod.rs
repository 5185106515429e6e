//! Signaling layer: in-memory room membership for the WebRTC relay.

pub mod registry;

pub use registry::{ConnectionId, RoomMember, RoomRegistry};
