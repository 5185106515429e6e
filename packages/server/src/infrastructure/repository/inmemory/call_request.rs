//! InMemory CallRequest Repository 実装
//!
//! ドメイン層が定義する CallRequestRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! 現在、ドメインモデル（`CallRequest`）を直接ストレージとして使用しています。
//! これは InMemory 実装では許容される妥協ですが、将来 MongoDB / PostgreSQL
//! などの DBMS を実装する際は、以下の変換層が必要になります：
//!
//! ```text
//! DB Row/Document → CallRequestData (DTO) → CallRequest (ドメインモデル)
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AuthUser, CallRequest, CallRequestRepository, CallStatus, RepositoryError, RequestId, Role,
    Timestamp, UserId,
};

/// インメモリ CallRequest Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryCallRequestRepository {
    requests: Mutex<HashMap<String, CallRequest>>,
}

impl InMemoryCallRequestRepository {
    /// 新しい InMemoryCallRequestRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されているリクエスト数を取得（テスト用）
    pub async fn count(&self) -> usize {
        let requests = self.requests.lock().await;
        requests.len()
    }
}

#[async_trait]
impl CallRequestRepository for InMemoryCallRequestRepository {
    async fn insert(&self, request: CallRequest) -> Result<(), RepositoryError> {
        let mut requests = self.requests.lock().await;
        requests.insert(request.id.as_str().to_string(), request);
        Ok(())
    }

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<CallRequest>, RepositoryError> {
        let requests = self.requests.lock().await;
        Ok(requests.get(id.as_str()).cloned())
    }

    async fn save(&self, request: CallRequest) -> Result<(), RepositoryError> {
        let mut requests = self.requests.lock().await;
        requests.insert(request.id.as_str().to_string(), request);
        Ok(())
    }

    async fn list_by_college(
        &self,
        college_id: &UserId,
    ) -> Result<Vec<CallRequest>, RepositoryError> {
        let requests = self.requests.lock().await;
        let mut found: Vec<CallRequest> = requests
            .values()
            .filter(|r| &r.college_id == college_id)
            .cloned()
            .collect();
        // 新しい順
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn list_by_recruiter(
        &self,
        recruiter_id: &UserId,
    ) -> Result<Vec<CallRequest>, RepositoryError> {
        let requests = self.requests.lock().await;
        let mut found: Vec<CallRequest> = requests
            .values()
            .filter(|r| &r.recruiter_id == recruiter_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn list_scheduled_for(
        &self,
        caller: &AuthUser,
        cutoff: Timestamp,
    ) -> Result<Vec<CallRequest>, RepositoryError> {
        let requests = self.requests.lock().await;
        let mut found: Vec<CallRequest> = requests
            .values()
            .filter(|r| match caller.role {
                Role::Recruiter => r.recruiter_id == caller.user_id,
                Role::Student => r.student_ids.contains(&caller.user_id),
                Role::College => caller.college_scope() == Some(&r.college_id),
            })
            .filter(|r| matches!(r.status, CallStatus::Scheduled | CallStatus::Active))
            .filter(|r| r.scheduled_time.is_some_and(|t| t >= cutoff))
            .cloned()
            .collect();
        // 開始時刻の早い順
        found.sort_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time));
        Ok(found)
    }
}
