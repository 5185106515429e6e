//! InMemory Identity Provider 実装
//!
//! 不透明な Bearer トークンを認証済みユーザーに解決します。トークンの発行
//! （ログイン・JWT 署名）は外部コラボレーターの責務であり、この実装は
//! 事前に登録されたトークン表を引くだけです。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{AuthError, AuthUser, IdentityProvider};

/// インメモリ Identity Provider
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    tokens: Mutex<HashMap<String, AuthUser>>,
}

impl InMemoryIdentityProvider {
    /// 空のトークン表で作成
    pub fn new() -> Self {
        Self::default()
    }

    /// トークンとユーザーの対応を登録
    pub async fn register(&self, token: impl Into<String>, user: AuthUser) {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(token.into(), user);
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<AuthUser, AuthError> {
        let tokens = self.tokens.lock().await;
        tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}
