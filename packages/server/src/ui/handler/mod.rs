//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    accept_video_call_request, complete_video_call, get_college_requests, get_recruiter_requests,
    get_scheduled_calls, get_students_by_college, health_check, join_video_call,
    request_video_call, schedule_video_call,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
