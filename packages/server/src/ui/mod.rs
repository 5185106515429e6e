//! HTTP and WebSocket server implementation.

pub mod auth;
mod handler;
mod runner;
mod signal;
pub mod state; // UseCase 層・テストからアクセスするため public

pub use runner::{build_router, run};
