//! UseCase: ビデオ通話完了
//!
//! 管理上の遷移（active → completed）。ルームが空になっても自動では
//! 呼ばれません（参加者は再接続しうるため）。completed は終端状態です。

use std::sync::Arc;

use crate::domain::{AuthUser, CallRequest, CallRequestRepository, RequestId};

use super::{error::CallFlowError, locks::RequestLocks};

/// 通話完了のユースケース
pub struct CompleteCallUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn CallRequestRepository>,
    /// リクエスト ID 単位の直列化ロック
    locks: Arc<RequestLocks>,
}

impl CompleteCallUseCase {
    /// 新しい CompleteCallUseCase を作成
    pub fn new(repository: Arc<dyn CallRequestRepository>, locks: Arc<RequestLocks>) -> Self {
        Self { repository, locks }
    }

    /// 通話完了を実行
    ///
    /// # Returns
    ///
    /// * `Ok(CallRequest)` - completed 状態のリクエスト
    /// * `Err(CallFlowError)` - 完了失敗（状態は変更されない）
    pub async fn execute(
        &self,
        caller: AuthUser,
        request_id: RequestId,
    ) -> Result<CallRequest, CallFlowError> {
        let _guard = self.locks.acquire(&request_id).await;

        let mut request = self
            .repository
            .find_by_id(&request_id)
            .await?
            .ok_or(CallFlowError::NotFound)?;

        if !request.may_administer(&caller) {
            return Err(CallFlowError::Forbidden);
        }

        request.complete()?;
        self.repository.save(request.clone()).await?;

        Ok(request)
    }
}
