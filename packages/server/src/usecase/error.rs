//! UseCase 層のエラー定義
//!
//! NotFound / Forbidden / 状態遷移エラー / ストア障害を区別して返します。
//! HTTP ステータスへの変換は UI 層の責務です。

use thiserror::Error;

use crate::domain::{RepositoryError, TransitionError};

/// リクエスト作成のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestCallError {
    /// リクルーター以外はリクエストを作成できない
    #[error("only a recruiter may request a video call")]
    NotRecruiter,

    /// リクエスト ID の採番に失敗
    #[error("failed to allocate request id: {0}")]
    IdAllocation(String),

    /// ストア障害
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// ライフサイクル遷移（accept / schedule / join / complete）共通のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallFlowError {
    /// 対象のリクエストが存在しない
    #[error("video call request not found")]
    NotFound,

    /// 呼び出し元にその遷移の権限がない
    #[error("caller is not authorized for this call request")]
    Forbidden,

    /// 状態機械が遷移を拒否した
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// ルームトークンの採番に失敗
    #[error("failed to allocate room token: {0}")]
    RoomAllocation(String),

    /// ストア障害
    #[error(transparent)]
    Store(#[from] RepositoryError),
}
