//! UseCase: リクエスト一覧の読み取り専用プロジェクション
//!
//! 大学別・リクルーター別の一覧と、「直近の予定」ビューを提供します。
//! 予定ビューは status ∈ {scheduled, active} かつ開催時刻が過去 24 時間
//! 以内のものに限定されます（意図的な staleness 境界であり、削除では
//! ありません）。

use std::sync::Arc;

use campuslink_shared::time::now_utc_millis;

use crate::domain::{AuthUser, CallRequest, CallRequestRepository, Timestamp};

use super::error::CallFlowError;

/// 「直近の予定」ビューに含める開催時刻の遡り幅（24 時間）
pub const SCHEDULED_VIEW_LOOKBACK_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// リクエスト一覧のユースケース
pub struct ListRequestsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn CallRequestRepository>,
}

impl ListRequestsUseCase {
    /// 新しい ListRequestsUseCase を作成
    pub fn new(repository: Arc<dyn CallRequestRepository>) -> Self {
        Self { repository }
    }

    /// 呼び出し元の大学宛のリクエスト一覧（作成の新しい順）
    ///
    /// # Errors
    ///
    /// 大学アクター以外の呼び出しは `CallFlowError::Forbidden`
    pub async fn college_requests(
        &self,
        caller: &AuthUser,
    ) -> Result<Vec<CallRequest>, CallFlowError> {
        let college_id = caller.college_scope().ok_or(CallFlowError::Forbidden)?;
        Ok(self.repository.list_by_college(college_id).await?)
    }

    /// 呼び出し元のリクルーターが出したリクエスト一覧（作成の新しい順）
    pub async fn recruiter_requests(
        &self,
        caller: &AuthUser,
    ) -> Result<Vec<CallRequest>, CallFlowError> {
        Ok(self.repository.list_by_recruiter(&caller.user_id).await?)
    }

    /// 呼び出し元から見える「直近の予定」一覧（開催時刻の早い順）
    pub async fn scheduled_calls(
        &self,
        caller: &AuthUser,
    ) -> Result<Vec<CallRequest>, CallFlowError> {
        let cutoff = Timestamp::new(now_utc_millis() - SCHEDULED_VIEW_LOOKBACK_MILLIS);
        Ok(self.repository.list_scheduled_for(caller, cutoff).await?)
    }
}
