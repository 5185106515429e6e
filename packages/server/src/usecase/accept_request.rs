//! UseCase: ビデオ通話リクエスト承認
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AcceptRequestUseCase::execute() メソッド
//! - 対象大学による pending → accepted 遷移
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：承認は対象大学のアクターのみに許可される
//! - 冪等性の保証：承認済みリクエストへの再承認は no-op で成功する
//! - 状態の後退禁止：scheduled 以降のリクエストは承認できない
//!
//! ### どのような状況を想定しているか
//! - 正常系：対象大学による承認・再承認
//! - 異常系：未知の ID、権限のない呼び出し元、進みすぎた状態

use std::sync::Arc;

use crate::domain::{AuthUser, CallRequest, CallRequestRepository, RequestId};

use super::{error::CallFlowError, locks::RequestLocks};

/// リクエスト承認のユースケース
pub struct AcceptRequestUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn CallRequestRepository>,
    /// リクエスト ID 単位の直列化ロック
    locks: Arc<RequestLocks>,
}

impl AcceptRequestUseCase {
    /// 新しい AcceptRequestUseCase を作成
    pub fn new(repository: Arc<dyn CallRequestRepository>, locks: Arc<RequestLocks>) -> Self {
        Self { repository, locks }
    }

    /// リクエスト承認を実行
    ///
    /// # Returns
    ///
    /// * `Ok(CallRequest)` - accepted 状態のリクエスト
    /// * `Err(CallFlowError)` - 承認失敗（状態は変更されない）
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

        if !request.is_target_college(&caller) {
            return Err(CallFlowError::Forbidden);
        }

        let changed = request.accept()?;
        if changed {
            self.repository.save(request.clone()).await?;
        }

        Ok(request)
    }
}
