pub mod student_repository;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewStudent, Student};

pub use student_repository::PgStudentRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::UniqueViolation,
            _ => Self::Sqlx(err),
        }
    }
}

/// Storage for the `students` table. Each call is a single statement.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn ping(&self) -> Result<(), RepositoryError>;

    async fn insert(&self, student: &NewStudent) -> Result<Student, RepositoryError>;

    /// All rows ordered by id.
    async fn list(&self) -> Result<Vec<Student>, RepositoryError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>, RepositoryError>;

    /// Returns `None` when no row has `id`.
    async fn update(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, RepositoryError>;

    /// Returns `true` when a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}
