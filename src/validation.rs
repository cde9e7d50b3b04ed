use crate::error::{AppError, AppResult, FieldErrors};
use crate::models::{FieldValue, NewStudent, StudentPayload};

const MISSING_FIELD: &str = "Missing data for required field.";
const BLANK_FIELD: &str = "Field may not be blank.";
const INVALID_EMAIL: &str = "Not a valid email address.";
const NOT_A_STRING: &str = "Not a valid string.";
const STUDENT_NOT_FOUND: &str = "Student not found.";

/// Checks every field of `payload` and reports all failures at once.
pub fn validate_student(payload: StudentPayload) -> AppResult<NewStudent> {
    let mut errors = FieldErrors::new();

    let name = required_text(&mut errors, "name", payload.name);
    let major = required_text(&mut errors, "major", payload.major);
    let email = match string_field(&mut errors, "email", payload.email) {
        Some(raw) => match validate_email(&raw) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.entry("email").or_default().push(INVALID_EMAIL);
                None
            }
        },
        None => None,
    };

    match (name, email, major) {
        (Some(name), Some(email), Some(major)) if errors.is_empty() => {
            Ok(NewStudent { name, email, major })
        }
        _ => Err(AppError::validation(errors)),
    }
}

fn string_field(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<FieldValue>,
) -> Option<String> {
    match value {
        Some(FieldValue::Text(raw)) => Some(raw),
        Some(FieldValue::Other(_)) => {
            errors.entry(field).or_default().push(NOT_A_STRING);
            None
        }
        None => {
            errors.entry(field).or_default().push(MISSING_FIELD);
            None
        }
    }
}

fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<FieldValue>,
) -> Option<String> {
    let raw = string_field(errors, field, value)?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.entry(field).or_default().push(BLANK_FIELD);
        return None;
    }
    Some(trimmed.to_owned())
}

pub fn validate_email(raw: &str) -> AppResult<String> {
    let invalid = || {
        let mut errors = FieldErrors::new();
        errors.insert("email", vec![INVALID_EMAIL]);
        AppError::validation(errors)
    };

    let email = raw.trim().to_ascii_lowercase();
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }
    if domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(email)
}

/// Path ids must be positive decimal integers; anything else is treated as a
/// route that matches no student.
pub fn parse_student_id(raw: &str) -> AppResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AppError::not_found(STUDENT_NOT_FOUND));
    }

    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))
}
