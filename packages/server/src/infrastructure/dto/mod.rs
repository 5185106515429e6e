//! Data transfer objects for the HTTP API and the signaling channel.

pub mod http;
pub mod websocket;
