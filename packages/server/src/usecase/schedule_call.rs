//! UseCase: ビデオ通話スケジュール設定
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ScheduleCallUseCase::execute() メソッド
//! - 対象大学による accepted → scheduled 遷移と開催時刻の設定
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：スケジュールは承認後・未来の時刻に限られる
//! - 失敗時に scheduled_time が設定されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：承認済みリクエストのスケジュール
//! - 異常系：未承認、過去の時刻、権限のない呼び出し元

use std::sync::Arc;

use campuslink_shared::time::now_utc_millis;

use crate::domain::{AuthUser, CallRequest, CallRequestRepository, RequestId, Timestamp};

use super::{error::CallFlowError, locks::RequestLocks};

/// スケジュール設定のユースケース
pub struct ScheduleCallUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn CallRequestRepository>,
    /// リクエスト ID 単位の直列化ロック
    locks: Arc<RequestLocks>,
}

impl ScheduleCallUseCase {
    /// 新しい ScheduleCallUseCase を作成
    pub fn new(repository: Arc<dyn CallRequestRepository>, locks: Arc<RequestLocks>) -> Self {
        Self { repository, locks }
    }

    /// スケジュール設定を実行
    ///
    /// # Arguments
    ///
    /// * `caller` - 認証済みの呼び出し元（対象大学のアクターであること）
    /// * `request_id` - 対象リクエストの ID
    /// * `scheduled_time` - 開催時刻（未来であること）
    ///
    /// # Returns
    ///
    /// * `Ok(CallRequest)` - scheduled 状態のリクエスト
    /// * `Err(CallFlowError)` - 設定失敗（状態は変更されない）
    pub async fn execute(
        &self,
        caller: AuthUser,
        request_id: RequestId,
        scheduled_time: Timestamp,
    ) -> Result<CallRequest, CallFlowError> {
        let _guard = self.locks.acquire(&request_id).await;

        let mut request = self
            .repository
            .find_by_id(&request_id)
            .await?
            .ok_or(CallFlowError::NotFound)?;

        if !request.is_target_college(&caller) {
            return Err(CallFlowError::Forbidden);
        }

        request.schedule(scheduled_time, Timestamp::new(now_utc_millis()))?;
        self.repository.save(request.clone()).await?;

        Ok(request)
    }
}
