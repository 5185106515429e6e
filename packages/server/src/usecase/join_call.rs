//! UseCase: ビデオ通話参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinCallUseCase::execute() メソッド
//! - 参加資格・状態・時刻ウィンドウの検査とルームトークンの採番
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：参加はリクルーター・対象大学・招待学生に限られる
//! - ルームトークンがリクエストごとに一度だけ採番されることを保証
//!   （並行 join でも同じトークンが返る）
//! - 失敗時に status / room_id / 参加ログが変化しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ウィンドウ内の参加、複数参加者、再参加
//! - 異常系：未知の ID、資格のない参加者、未スケジュール、ウィンドウ外
//! - エッジケース：並行 join の競合

use std::sync::Arc;

use campuslink_shared::time::now_utc_millis;

use crate::domain::{
    AuthUser, CallRequest, CallRequestRepository, RequestId, RoomId, RoomIdFactory, Timestamp,
};

use super::{error::CallFlowError, locks::RequestLocks};

/// 通話参加のユースケース
pub struct JoinCallUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn CallRequestRepository>,
    /// リクエスト ID 単位の直列化ロック
    locks: Arc<RequestLocks>,
}

impl JoinCallUseCase {
    /// 新しい JoinCallUseCase を作成
    pub fn new(repository: Arc<dyn CallRequestRepository>, locks: Arc<RequestLocks>) -> Self {
        Self { repository, locks }
    }

    /// 通話参加を実行
    ///
    /// 検査は NotFound → Forbidden → 状態 → ウィンドウの順。ウィンドウ外の
    /// 資格のない参加者にも Forbidden が返ります。
    ///
    /// # Returns
    ///
    /// * `Ok((RoomId, CallRequest))` - シグナリングに使うルームトークンと
    ///   active 状態のリクエスト
    /// * `Err(CallFlowError)` - 参加失敗（状態は変更されない）
    pub async fn execute(
        &self,
        caller: AuthUser,
        request_id: RequestId,
    ) -> Result<(RoomId, CallRequest), CallFlowError> {
        let _guard = self.locks.acquire(&request_id).await;

        let mut request = self
            .repository
            .find_by_id(&request_id)
            .await?
            .ok_or(CallFlowError::NotFound)?;

        if !request.may_join(&caller) {
            return Err(CallFlowError::Forbidden);
        }

        // 候補トークンは既にルームが確定していれば使われない
        let candidate = RoomIdFactory::generate()
            .map_err(|e| CallFlowError::RoomAllocation(e.to_string()))?;

        let room_id = request.join(
            caller.user_id,
            caller.role,
            Timestamp::new(now_utc_millis()),
            candidate,
        )?;

        self.repository.save(request.clone()).await?;

        Ok((room_id, request))
    }
}
