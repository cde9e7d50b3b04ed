use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{RepositoryError, StudentRepository};
use crate::models::{NewStudent, Student};

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let repository = Self { pool };
        repository.ensure_table().await?;
        Ok(repository)
    }

    async fn ensure_table(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                major TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, RepositoryError> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, email, major)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, major
            "#,
        )
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.major)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, major FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, major FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET
                name = $2,
                email = $3,
                major = $4
            WHERE id = $1
            RETURNING id, name, email, major
            "#,
        )
        .bind(id)
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.major)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
