use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, Eq, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub major: String,
}

/// Raw create/update body. Fields stay optional so that a missing field is
/// reported by validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct StudentPayload {
    pub name: Option<FieldValue>,
    pub email: Option<FieldValue>,
    pub major: Option<FieldValue>,
}

/// A present, non-null payload field. Non-string JSON values are kept as
/// `Other` so validation can report them per field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub major: String,
}

#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
