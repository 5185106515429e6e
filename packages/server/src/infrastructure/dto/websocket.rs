//! Signaling message DTOs.
//!
//! Internally tagged enums; the tag is the kebab-case event name and the
//! payload fields are camelCase. `payload` carries the WebRTC SDP/candidate
//! blob verbatim; the relay never inspects it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Role;

/// Client → server signaling messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientSignal {
    /// Register this connection in a room
    JoinRoom {
        room_id: String,
        user_id: String,
        user_type: Role,
    },
    /// SDP offer for one peer in the room
    Offer {
        room_id: String,
        payload: Value,
        target_user_id: String,
    },
    /// SDP answer for one peer in the room
    Answer {
        room_id: String,
        payload: Value,
        target_user_id: String,
    },
    /// ICE candidate for one peer in the room; sent any number of times
    IceCandidate {
        room_id: String,
        payload: Value,
        target_user_id: String,
    },
    /// Deregister this connection from a room
    LeaveRoom { room_id: String, user_id: String },
}

/// Server → client signaling messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerSignal {
    /// A peer joined the room
    UserJoined { user_id: String, user_type: Role },
    /// A peer left the room (explicit leave or connection drop)
    UserLeft { user_id: String },
    /// Targeted offer forward
    Offer { payload: Value, from_user_id: String },
    /// Targeted answer forward
    Answer { payload: Value, from_user_id: String },
    /// Targeted ICE candidate forward
    IceCandidate { payload: Value, from_user_id: String },
}
