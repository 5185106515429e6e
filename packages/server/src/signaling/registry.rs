//! In-memory room registry.
//!
//! Process-wide mapping from room token to the set of currently connected
//! signaling peers. Rooms are created on first join, destroyed when the last
//! member leaves, and never persisted; a restart implicitly destroys every
//! room and clients re-join.
//!
//! The registry is an injected service owned by `AppState`, not a module
//! global, so each test can run against a fresh instance. All membership
//! mutation goes through one internal lock; nothing suspends while holding it.

use std::{collections::HashMap, fmt, sync::Arc};

use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{Role, UserId};

/// Opaque identifier of one signaling connection.
///
/// Distinct from the participant identity: the same identity may reconnect
/// with a new connection id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh connection id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One connected signaling peer inside a room.
#[derive(Debug, Clone)]
pub struct RoomMember {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub role: Role,
    /// Outbound channel to the peer's connection task
    pub sender: UnboundedSender<String>,
}

#[derive(Debug, Default)]
struct Room {
    members: HashMap<ConnectionId, RoomMember>,
}

/// Process-wide signaling room registry.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, Room>>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add a member to a room, creating the room if absent.
    ///
    /// # Returns
    ///
    /// The other current members of the room, for the relay's "peer joined"
    /// fan-out. The joiner receives no enumerated snapshot; peers are
    /// discovered through prior join broadcasts.
    pub async fn join(&self, room_id: &str, member: RoomMember) -> Vec<RoomMember> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(room_id.to_string()).or_default();
        let others: Vec<RoomMember> = room
            .members
            .values()
            .filter(|m| m.connection_id != member.connection_id)
            .cloned()
            .collect();
        room.members.insert(member.connection_id.clone(), member);
        others
    }

    /// Remove the member with the given connection id from a room.
    ///
    /// Deletes the room entry once its member set becomes empty.
    pub async fn leave(&self, room_id: &str, connection_id: &ConnectionId) -> Option<RoomMember> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id)?;
        let removed = room.members.remove(connection_id);
        if room.members.is_empty() {
            rooms.remove(room_id);
        }
        removed
    }

    /// Remove every membership of the given connection across all rooms.
    ///
    /// Used on abrupt disconnect (no explicit leave). Returns the affected
    /// (room id, removed member) pairs so the relay can emit "peer left" to
    /// the remaining members of each room.
    pub async fn disconnect_cleanup(
        &self,
        connection_id: &ConnectionId,
    ) -> Vec<(String, RoomMember)> {
        let mut rooms = self.rooms.lock().await;
        let mut removed = Vec::new();
        for (room_id, room) in rooms.iter_mut() {
            if let Some(member) = room.members.remove(connection_id) {
                removed.push((room_id.clone(), member));
            }
        }
        rooms.retain(|_, room| !room.members.is_empty());
        removed
    }

    /// Send `text` to every member of a room, optionally excluding one
    /// connection. Returns the number of members the message was queued for.
    ///
    /// Send failures (receiver already gone) are skipped; the disconnect
    /// path cleans the stale membership up.
    pub async fn broadcast(
        &self,
        room_id: &str,
        text: &str,
        exclude: Option<&ConnectionId>,
    ) -> usize {
        let rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(room_id) else {
            return 0;
        };
        let mut delivered = 0;
        for member in room.members.values() {
            if Some(&member.connection_id) == exclude {
                continue;
            }
            if member.sender.send(text.to_string()).is_ok() {
                delivered += 1;
            } else {
                tracing::warn!(
                    "Failed to queue message for '{}' in room '{}'",
                    member.user_id,
                    room_id
                );
            }
        }
        delivered
    }

    /// Send `text` to the connection(s) registered under `target` in a room.
    ///
    /// Targeted delivery: never falls back to a broadcast. Returns the number
    /// of connections the message was queued for (0 when the target is not
    /// present).
    pub async fn send_to_identity(&self, room_id: &str, target: &str, text: &str) -> usize {
        let rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(room_id) else {
            return 0;
        };
        let mut delivered = 0;
        for member in room.members.values() {
            if member.user_id.as_str() != target {
                continue;
            }
            if member.sender.send(text.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Look up the member registered under a connection id in a room.
    ///
    /// The relay uses this to resolve the sending identity of a targeted
    /// forward; a connection that never joined the room gets `None`.
    pub async fn find_member(
        &self,
        room_id: &str,
        connection_id: &ConnectionId,
    ) -> Option<RoomMember> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id)?.members.get(connection_id).cloned()
    }

    /// Number of members currently in a room (0 when the room is absent).
    pub async fn member_count(&self, room_id: &str) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map_or(0, |room| room.members.len())
    }

    /// Whether the room currently exists.
    pub async fn contains_room(&self, room_id: &str) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn member(user: &str, role: Role) -> (RoomMember, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            RoomMember {
                connection_id: ConnectionId::generate(),
                user_id: UserId::new(user.to_string()).unwrap(),
                role,
                sender: tx,
            },
            rx,
        )
    }

    #[tokio::test]
    async fn test_join_creates_room_and_returns_existing_peers() {
        // テスト項目: join でルームが作成され、既存メンバーのみが返される
        // given (前提条件):
        let registry = RoomRegistry::new();
        let (alice, _rx_a) = member("alice", Role::Student);
        let (bob, _rx_b) = member("bob", Role::Recruiter);

        // when (操作):
        let peers_for_alice = registry.join("room-1", alice.clone()).await;
        let peers_for_bob = registry.join("room-1", bob.clone()).await;

        // then (期待する結果): 最初の参加者には誰も、2人目には alice が返される
        assert!(peers_for_alice.is_empty());
        assert_eq!(peers_for_bob.len(), 1);
        assert_eq!(peers_for_bob[0].user_id.as_str(), "alice");
        assert_eq!(registry.member_count("room-1").await, 2);
    }

    #[tokio::test]
    async fn test_leave_removes_member_and_empty_room() {
        // テスト項目: 全メンバーが leave するとルームエントリが消える
        // given (前提条件):
        let registry = RoomRegistry::new();
        let (alice, _rx_a) = member("alice", Role::Student);
        let (bob, _rx_b) = member("bob", Role::Recruiter);
        registry.join("room-1", alice.clone()).await;
        registry.join("room-1", bob.clone()).await;

        // when (操作):
        let removed = registry.leave("room-1", &alice.connection_id).await;

        // then (期待する結果): alice が削除され、bob は残る
        assert_eq!(removed.unwrap().user_id.as_str(), "alice");
        assert_eq!(registry.member_count("room-1").await, 1);

        // 最後のメンバーが leave するとルーム自体が消える
        registry.leave("room-1", &bob.connection_id).await;
        assert!(!registry.contains_room("room-1").await);
    }

    #[tokio::test]
    async fn test_n_joins_n_leaves_room_absent() {
        // テスト項目: N 回 join / N 回 leave 後にルームはレジストリに存在しない
        // given (前提条件):
        let registry = RoomRegistry::new();
        let mut members = Vec::new();
        for i in 0..5 {
            let (m, rx) = member(&format!("user-{i}"), Role::Student);
            registry.join("room-1", m.clone()).await;
            members.push((m, rx));
        }
        assert_eq!(registry.member_count("room-1").await, 5);

        // when (操作):
        for (m, _rx) in &members {
            registry.leave("room-1", &m.connection_id).await;
        }

        // then (期待する結果):
        assert!(!registry.contains_room("room-1").await);
    }

    #[tokio::test]
    async fn test_leave_unknown_room_is_noop() {
        // テスト項目: 存在しないルームからの leave は None を返すだけ
        // given (前提条件):
        let registry = RoomRegistry::new();

        // when (操作):
        let removed = registry.leave("nowhere", &ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn test_disconnect_cleanup_spans_all_rooms() {
        // テスト項目: 切断クリーンアップは全ルームからそのコネクションを除去する
        // given (前提条件): alice が 2 つのルームに同じコネクションで参加
        let registry = RoomRegistry::new();
        let (alice, _rx_a) = member("alice", Role::Student);
        let (bob, _rx_b) = member("bob", Role::Recruiter);
        registry.join("room-1", alice.clone()).await;
        registry.join("room-2", alice.clone()).await;
        registry.join("room-2", bob.clone()).await;

        // when (操作):
        let mut removed = registry.disconnect_cleanup(&alice.connection_id).await;

        // then (期待する結果): 2 ルーム分の除去が報告され、空になった room-1 は消える
        removed.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].0, "room-1");
        assert_eq!(removed[1].0, "room-2");
        assert!(!registry.contains_room("room-1").await);
        assert_eq!(registry.member_count("room-2").await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_excludes_sender() {
        // テスト項目: broadcast は除外指定されたコネクションに配信しない
        // given (前提条件):
        let registry = RoomRegistry::new();
        let (alice, mut rx_a) = member("alice", Role::Student);
        let (bob, mut rx_b) = member("bob", Role::Recruiter);
        registry.join("room-1", alice.clone()).await;
        registry.join("room-1", bob.clone()).await;

        // when (操作):
        let delivered = registry
            .broadcast("room-1", "hello", Some(&alice.connection_id))
            .await;

        // then (期待する結果): bob のみ受信
        assert_eq!(delivered, 1);
        assert_eq!(rx_b.try_recv().unwrap(), "hello");
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_to_identity_is_targeted() {
        // テスト項目: 宛先指定の送信は該当メンバーだけに届き、ブロードキャストされない
        // given (前提条件): 3 人が同じルームに参加
        let registry = RoomRegistry::new();
        let (alice, mut rx_a) = member("alice", Role::Student);
        let (bob, mut rx_b) = member("bob", Role::Recruiter);
        let (carol, mut rx_c) = member("carol", Role::Student);
        registry.join("room-1", alice.clone()).await;
        registry.join("room-1", bob.clone()).await;
        registry.join("room-1", carol.clone()).await;

        // when (操作):
        let delivered = registry.send_to_identity("room-1", "bob", "offer-json").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx_b.try_recv().unwrap(), "offer-json");
        assert!(rx_a.try_recv().is_err());
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_find_member_by_connection() {
        // テスト項目: コネクション ID からルーム内のメンバーを引ける
        // given (前提条件):
        let registry = RoomRegistry::new();
        let (alice, _rx_a) = member("alice", Role::Student);
        registry.join("room-1", alice.clone()).await;

        // when (操作):
        let found = registry.find_member("room-1", &alice.connection_id).await;
        let missing = registry
            .find_member("room-1", &ConnectionId::generate())
            .await;

        // then (期待する結果):
        assert_eq!(found.unwrap().user_id.as_str(), "alice");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_send_to_identity_unknown_target() {
        // テスト項目: ルームにいない宛先への送信は 0 件で終わる
        // given (前提条件):
        let registry = RoomRegistry::new();
        let (alice, _rx_a) = member("alice", Role::Student);
        registry.join("room-1", alice).await;

        // when (操作):
        let delivered = registry.send_to_identity("room-1", "ghost", "offer").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }
}
