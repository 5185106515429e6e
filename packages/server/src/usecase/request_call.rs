//! UseCase: ビデオ通話リクエスト作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RequestCallUseCase::execute() メソッド
//! - リクルーターによるリクエスト作成（pending 状態での永続化）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：作成はリクルーターのみに許可される
//! - 作成直後の状態（pending・scheduled_time なし・room_id なし）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：リクルーターによる作成（招待学生あり／なし）
//! - 異常系：リクルーター以外による作成試行
//! - 異常系：ストア障害

use std::sync::Arc;

use campuslink_shared::time::now_utc_millis;

use crate::domain::{
    AuthUser, CallRequest, CallRequestRepository, ConversationId, RequestIdFactory, Role,
    Timestamp, UserId,
};

use super::error::RequestCallError;

/// ビデオ通話リクエスト作成のユースケース
pub struct RequestCallUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn CallRequestRepository>,
}

impl RequestCallUseCase {
    /// 新しい RequestCallUseCase を作成
    pub fn new(repository: Arc<dyn CallRequestRepository>) -> Self {
        Self { repository }
    }

    /// リクエスト作成を実行
    ///
    /// # Arguments
    ///
    /// * `caller` - 認証済みの呼び出し元（リクルーターであること）
    /// * `college_id` - 対象大学の ID
    /// * `student_ids` - 招待する学生（空でもよい）
    /// * `message` - リクエストメッセージ
    /// * `conversation_id` - 関連する会話の ID
    ///
    /// # Returns
    ///
    /// * `Ok(CallRequest)` - pending 状態で永続化されたリクエスト
    /// * `Err(RequestCallError)` - 作成失敗
    pub async fn execute(
        &self,
        caller: AuthUser,
        college_id: UserId,
        student_ids: Vec<UserId>,
        message: String,
        conversation_id: ConversationId,
    ) -> Result<CallRequest, RequestCallError> {
        if caller.role != Role::Recruiter {
            return Err(RequestCallError::NotRecruiter);
        }

        let id = RequestIdFactory::generate()
            .map_err(|e| RequestCallError::IdAllocation(e.to_string()))?;
        let request = CallRequest::new(
            id,
            caller.user_id,
            college_id,
            student_ids,
            message,
            conversation_id,
            Timestamp::new(now_utc_millis()),
        );

        self.repository.insert(request.clone()).await?;

        Ok(request)
    }
}
