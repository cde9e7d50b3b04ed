#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use students_backend::config::AppConfig;
use students_backend::models::{NewStudent, Student};
use students_backend::repositories::{RepositoryError, StudentRepository};
use students_backend::routes;
use students_backend::state::AppState;

/// Mirrors the `students` table: generated ids, unique emails.
#[derive(Default)]
pub struct InMemoryStudentRepository {
    inner: Mutex<Table>,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Student>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|row| row.email == email && Some(row.id) != except)
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, RepositoryError> {
        let mut table = self.inner.lock().unwrap();
        if table.email_taken(&student.email, None) {
            return Err(RepositoryError::UniqueViolation);
        }

        table.next_id += 1;
        let row = Student {
            id: table.next_id,
            name: student.name.clone(),
            email: student.email.clone(),
            major: student.major.clone(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.inner.lock().unwrap().rows.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>, RepositoryError> {
        let table = self.inner.lock().unwrap();
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, RepositoryError> {
        let mut table = self.inner.lock().unwrap();
        if !table.rows.iter().any(|row| row.id == id) {
            return Ok(None);
        }
        if table.email_taken(&student.email, Some(id)) {
            return Err(RepositoryError::UniqueViolation);
        }

        let row = table
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .expect("row checked above");
        row.name = student.name.clone();
        row.email = student.email.clone();
        row.major = student.major.clone();
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut table = self.inner.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        Ok(table.rows.len() != before)
    }
}

/// Every call fails the way an unreachable database would.
pub struct UnavailableStudentRepository;

fn unavailable() -> RepositoryError {
    RepositoryError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl StudentRepository for UnavailableStudentRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(unavailable())
    }

    async fn insert(&self, _student: &NewStudent) -> Result<Student, RepositoryError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: i64) -> Result<Option<Student>, RepositoryError> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _id: i64,
        _student: &NewStudent,
    ) -> Result<Option<Student>, RepositoryError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<bool, RepositoryError> {
        Err(unavailable())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_owned(),
        database_url: "postgres://unused".to_owned(),
        database_max_connections: 1,
    }
}

pub fn build_app(repository: Arc<dyn StudentRepository>) -> Router {
    let state = AppState::with_repository(test_config(), repository);
    routes::router(Arc::new(state))
}

pub fn in_memory_app() -> Router {
    build_app(Arc::new(InMemoryStudentRepository::default()))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
