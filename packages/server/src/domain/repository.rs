//! Repository and collaborator trait definitions.
//!
//! ドメイン層が抽象を定義し、infrastructure 層が実装を提供します（依存性の逆転）。
//! 認証トークンの発行・資格情報の保存は外部コラボレーターの責務であり、
//! ここではその解決インターフェースだけを定義します。

use async_trait::async_trait;
use thiserror::Error;

use super::{
    entity::{AuthUser, CallRequest, StudentProfile},
    value_object::{RequestId, Timestamp, UserId},
};

/// Errors surfaced by the persistence collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store is unreachable or failed mid-operation. Not retried by the
    /// core; surfaced to the caller as a 500-class failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the identity collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authentication token was presented
    #[error("no authentication token, authorization denied")]
    MissingToken,

    /// The token did not resolve to a known identity
    #[error("token is not valid")]
    InvalidToken,
}

/// Persistence abstraction for CallRequest records.
///
/// Transitions are read-modify-write against this trait; the usecase layer
/// serializes them per request id, so implementations only need atomicity of
/// the individual operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallRequestRepository: Send + Sync {
    /// Persist a newly created request.
    async fn insert(&self, request: CallRequest) -> Result<(), RepositoryError>;

    /// Load a request by id. `None` if the id is unknown.
    async fn find_by_id(&self, id: &RequestId) -> Result<Option<CallRequest>, RepositoryError>;

    /// Persist the updated state of an existing request.
    async fn save(&self, request: CallRequest) -> Result<(), RepositoryError>;

    /// All requests targeting the given college, newest created first.
    async fn list_by_college(&self, college_id: &UserId)
    -> Result<Vec<CallRequest>, RepositoryError>;

    /// All requests initiated by the given recruiter, newest created first.
    async fn list_by_recruiter(
        &self,
        recruiter_id: &UserId,
    ) -> Result<Vec<CallRequest>, RepositoryError>;

    /// Scheduled/active requests visible to the caller (by role scope) whose
    /// scheduled time is at or after `cutoff`, ordered by scheduled time
    /// ascending.
    async fn list_scheduled_for(
        &self,
        caller: &AuthUser,
        cutoff: Timestamp,
    ) -> Result<Vec<CallRequest>, RepositoryError>;
}

/// Read-only student directory collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Students enrolled at the named college, sorted by name.
    async fn find_by_college(
        &self,
        college_name: &str,
    ) -> Result<Vec<StudentProfile>, RepositoryError>;
}

/// Identity collaborator: resolves an opaque bearer token to an
/// authenticated caller. Token issuance lives outside this repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the caller it identifies.
    async fn resolve(&self, token: &str) -> Result<AuthUser, AuthError>;
}
