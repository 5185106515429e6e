//! WebSocket signaling relay.
//!
//! One persistent connection per client. The relay forwards join/leave and
//! offer/answer/ICE messages between peers in the same room without
//! inspecting payloads. Everything is fire-and-forget: no acknowledgment, no
//! retry, no replay for peers that were offline at send time. Clients
//! re-negotiate by re-emitting `join-room` after a reconnect.
//!
//! Malformed messages and unknown rooms/targets are logged and dropped; a
//! misbehaving peer must never take down another peer's connection.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::UserId,
    infrastructure::dto::websocket::{ClientSignal, ServerSignal},
    signaling::{ConnectionId, RoomMember},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = ConnectionId::generate();
    tracing::info!("Signaling connection '{}' established", connection_id);

    // Create a channel for this connection to receive relayed messages
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Spawn a task to receive messages from this client
    let recv_state = state.clone();
    let recv_conn = connection_id.clone();
    let recv_tx = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_conn, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_signal(&text, &recv_conn, &recv_state, &recv_tx).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_conn);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed messages to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Abrupt disconnect: the equivalent of leave-room for every membership
    let removed = state.registry.disconnect_cleanup(&connection_id).await;
    for (room_id, member) in removed {
        let left = ServerSignal::UserLeft {
            user_id: member.user_id.into_string(),
        };
        let left_json = serde_json::to_string(&left).unwrap();
        state.registry.broadcast(&room_id, &left_json, None).await;
    }
    tracing::info!("Signaling connection '{}' closed", connection_id);
}

/// Dispatch one client message. Errors never propagate to the connection.
async fn handle_signal(
    text: &str,
    connection_id: &ConnectionId,
    state: &Arc<AppState>,
    tx: &mpsc::UnboundedSender<String>,
) {
    let signal = match serde_json::from_str::<ClientSignal>(text) {
        Ok(signal) => signal,
        Err(e) => {
            tracing::warn!("Dropping malformed signaling message: {}", e);
            return;
        }
    };

    match signal {
        ClientSignal::JoinRoom {
            room_id,
            user_id,
            user_type,
        } => {
            let identity = match UserId::new(user_id.clone()) {
                Ok(identity) => identity,
                Err(e) => {
                    tracing::warn!("Dropping join-room with invalid userId: {}", e);
                    return;
                }
            };

            let member = RoomMember {
                connection_id: connection_id.clone(),
                user_id: identity,
                role: user_type,
                sender: tx.clone(),
            };
            let others = state.registry.join(&room_id, member).await;

            // Broadcast user-joined to the members that were already there;
            // the joiner discovers peers through their earlier broadcasts.
            let joined = ServerSignal::UserJoined {
                user_id: user_id.clone(),
                user_type,
            };
            let joined_json = serde_json::to_string(&joined).unwrap();
            for peer in &others {
                if peer.sender.send(joined_json.clone()).is_err() {
                    tracing::warn!(
                        "Failed to queue user-joined for '{}' in room '{}'",
                        peer.user_id,
                        room_id
                    );
                }
            }
            tracing::info!("User '{}' joined room '{}'", user_id, room_id);
        }
        ClientSignal::Offer {
            room_id,
            payload,
            target_user_id,
        } => {
            forward_targeted(state, &room_id, connection_id, &target_user_id, |from| {
                ServerSignal::Offer {
                    payload,
                    from_user_id: from,
                }
            })
            .await;
        }
        ClientSignal::Answer {
            room_id,
            payload,
            target_user_id,
        } => {
            forward_targeted(state, &room_id, connection_id, &target_user_id, |from| {
                ServerSignal::Answer {
                    payload,
                    from_user_id: from,
                }
            })
            .await;
        }
        ClientSignal::IceCandidate {
            room_id,
            payload,
            target_user_id,
        } => {
            forward_targeted(state, &room_id, connection_id, &target_user_id, |from| {
                ServerSignal::IceCandidate {
                    payload,
                    from_user_id: from,
                }
            })
            .await;
        }
        ClientSignal::LeaveRoom { room_id, user_id } => {
            let Some(removed) = state.registry.leave(&room_id, connection_id).await else {
                tracing::warn!(
                    "Dropping leave-room for '{}': connection not in room '{}'",
                    user_id,
                    room_id
                );
                return;
            };

            let left = ServerSignal::UserLeft {
                user_id: removed.user_id.into_string(),
            };
            let left_json = serde_json::to_string(&left).unwrap();
            state.registry.broadcast(&room_id, &left_json, None).await;
            tracing::info!("User '{}' left room '{}'", user_id, room_id);
        }
    }
}

/// Forward an offer/answer/candidate to the targeted peer only.
///
/// The sending identity is resolved from the registry, not trusted from the
/// message. A connection that never joined the room, or a target that is not
/// present, drops the message with a log.
async fn forward_targeted(
    state: &Arc<AppState>,
    room_id: &str,
    connection_id: &ConnectionId,
    target_user_id: &str,
    build: impl FnOnce(String) -> ServerSignal,
) {
    let Some(from) = state.registry.find_member(room_id, connection_id).await else {
        tracing::warn!(
            "Dropping targeted message: connection '{}' is not in room '{}'",
            connection_id,
            room_id
        );
        return;
    };

    let signal = build(from.user_id.into_string());
    let json = serde_json::to_string(&signal).unwrap();
    let delivered = state
        .registry
        .send_to_identity(room_id, target_user_id, &json)
        .await;
    if delivered == 0 {
        tracing::warn!(
            "Target '{}' not found in room '{}'; message dropped",
            target_user_id,
            room_id
        );
    }
}
