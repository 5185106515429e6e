//! UseCase: 大学別の学生一覧
//!
//! 学生名簿コラボレーターへの読み取り専用パススルー。招待する学生を
//! 選ぶ画面のための一覧です。

use std::sync::Arc;

use crate::domain::{RepositoryError, StudentDirectory, StudentProfile};

/// 学生一覧のユースケース
pub struct ListStudentsUseCase {
    /// 学生名簿（読み取り専用コラボレーター）
    directory: Arc<dyn StudentDirectory>,
}

impl ListStudentsUseCase {
    /// 新しい ListStudentsUseCase を作成
    pub fn new(directory: Arc<dyn StudentDirectory>) -> Self {
        Self { directory }
    }

    /// 大学名で学生を検索（名前順）
    pub async fn execute(&self, college_name: &str) -> Result<Vec<StudentProfile>, RepositoryError> {
        self.directory.find_by_college(college_name).await
    }
}
