use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{MessageResponse, Student, StudentListResponse, StudentPayload};
use crate::state::AppState;
use crate::validation::{parse_student_id, validate_student};

const STUDENT_NOT_FOUND: &str = "Student not found.";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{student_id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

async fn create_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Student>)> {
    let new_student = validate_student(decode_payload(payload)?)?;

    let student = state
        .students
        .insert(&new_student)
        .await
        .map_err(|err| AppError::from_repository(err, "Failed to create student."))?;

    info!(student_id = student.id, "student created");
    Ok((StatusCode::CREATED, Json(student)))
}

async fn list_students(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<StudentListResponse>> {
    let students = state
        .students
        .list()
        .await
        .map_err(|err| AppError::from_repository(err, "Failed to fetch students."))?;

    Ok(Json(StudentListResponse { students }))
}

async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> AppResult<Json<Student>> {
    let student_id = parse_student_id(&student_id)?;

    let student = state
        .students
        .get_by_id(student_id)
        .await
        .map_err(|err| AppError::from_repository(err, "Failed to fetch student."))?
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))?;

    Ok(Json(student))
}

async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> AppResult<Json<Student>> {
    let student_id = parse_student_id(&student_id)?;
    let changes = validate_student(decode_payload(payload)?)?;

    let student = state
        .students
        .update(student_id, &changes)
        .await
        .map_err(|err| AppError::from_repository(err, "Failed to update student."))?
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))?;

    info!(student_id, "student updated");
    Ok(Json(student))
}

async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let student_id = parse_student_id(&student_id)?;

    let deleted = state
        .students
        .delete_by_id(student_id)
        .await
        .map_err(|err| AppError::from_repository(err, "Failed to delete student."))?;

    if !deleted {
        return Err(AppError::not_found(STUDENT_NOT_FOUND));
    }

    info!(student_id, "student deleted");
    Ok(Json(MessageResponse::new("Student deleted successfully.")))
}

fn decode_payload(
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> AppResult<StudentPayload> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}
