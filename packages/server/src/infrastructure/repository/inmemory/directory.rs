//! InMemory Student Directory 実装
//!
//! 学生名簿コラボレーターの読み取り専用実装。アカウント作成・認証情報の
//! 管理は本リポジトリの対象外です。

use async_trait::async_trait;

use crate::domain::{RepositoryError, StudentDirectory, StudentProfile};

/// インメモリ学生名簿
#[derive(Debug, Default)]
pub struct InMemoryStudentDirectory {
    students: Vec<StudentProfile>,
}

impl InMemoryStudentDirectory {
    /// 名簿を与えて作成
    pub fn new(students: Vec<StudentProfile>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl StudentDirectory for InMemoryStudentDirectory {
    async fn find_by_college(
        &self,
        college_name: &str,
    ) -> Result<Vec<StudentProfile>, RepositoryError> {
        let mut found: Vec<StudentProfile> = self
            .students
            .iter()
            .filter(|s| s.college == college_name)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}
