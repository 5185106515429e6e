//! Server state shared across handlers.

use std::sync::Arc;

use crate::{
    domain::{CallRequestRepository, IdentityProvider, StudentDirectory},
    signaling::RoomRegistry,
    usecase::RequestLocks,
};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn CallRequestRepository>,
    /// 学生名簿コラボレーター
    pub directory: Arc<dyn StudentDirectory>,
    /// 認証トークン解決コラボレーター
    pub identities: Arc<dyn IdentityProvider>,
    /// Signaling room registry (created at startup, dropped at shutdown)
    pub registry: Arc<RoomRegistry>,
    /// Per-request transition locks
    pub locks: Arc<RequestLocks>,
}

impl AppState {
    /// Assemble the application state from its collaborators.
    pub fn new(
        repository: Arc<dyn CallRequestRepository>,
        directory: Arc<dyn StudentDirectory>,
        identities: Arc<dyn IdentityProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            repository,
            directory,
            identities,
            registry: RoomRegistry::new(),
            locks: RequestLocks::new(),
        })
    }
}
