use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::event_store::StoreError;
use crate::domain::draft::DraftChange;
use crate::domain::event::{parse_timestamp, EventStatus, TimeRange};

#[derive(Debug)]
pub struct ApiError { pub status: StatusCode, pub body: Value }

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "message": message.into() }) }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn internal(message: impl Into<String>) -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, message) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (self.status, axum::Json(self.body)).into_response() }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Validation(errors) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: json!({ "message": "validation failed", "fieldErrors": errors, "validationFailed": true }),
            },
            StoreError::LockedEvent => Self { status: StatusCode::LOCKED, body: json!(err.notification()) },
            StoreError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            StoreError::NoDraft | StoreError::Repository(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
        }
    }
}

/// Dialog fields; absent ones stay as they are.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub status: Option<String>,
}

impl DraftPatch {
    pub fn into_changes(self) -> Result<Vec<DraftChange>, ApiError> {
        let status = match self.status.as_deref() {
            Some(label) => Some(label.parse::<EventStatus>().map_err(|_| ApiError::bad_request("invalid status"))?),
            None => None,
        };
        let changes = [
            self.title.map(DraftChange::Title),
            self.description.map(DraftChange::Description),
            self.start.map(DraftChange::Start),
            self.end.map(DraftChange::End),
            self.all_day.map(DraftChange::AllDay),
            status.map(DraftChange::Status),
        ];
        Ok(changes.into_iter().flatten().collect())
    }
}

/// Calendar range selection; both ends or neither.
#[derive(Debug, Default, Deserialize)]
pub struct RangeBody {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeBody {
    pub fn into_range(self) -> Result<Option<TimeRange>, ApiError> {
        match (self.start, self.end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => {
                let start = parse_timestamp(&start).map_err(|e| ApiError::bad_request(format!("start: {e}")))?;
                let end = parse_timestamp(&end).map_err(|e| ApiError::bad_request(format!("end: {e}")))?;
                Ok(Some(TimeRange::new(start, end)))
            }
            _ => Err(ApiError::bad_request("range needs both start and end")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}
