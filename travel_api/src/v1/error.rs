use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Serialize, Serializer};
use shared::models::Collection;
use shared::store::StoreError;
use shared::validation::ValidationErrors;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(serialize_with = "serialize_status")]
    #[schema(value_type = u16, example = 404)]
    pub status_code: StatusCode,
    pub message: String,
    /// Field name to violated rules, present on 422 responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{collection} with id {key:?} not found")]
    NotFound { collection: Collection, key: String },
    #[error("{collection} with id {key:?} already exists")]
    Conflict { collection: Collection, key: String },
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { collection, key } => ApiError::NotFound { collection, key },
            StoreError::AlreadyExists { collection, key } => {
                ApiError::Conflict { collection, key }
            }
            e => ApiError::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                debug!(%errors, "request failed validation");
                ErrorMessage {
                    status_code: StatusCode::UNPROCESSABLE_ENTITY,
                    message: "one or more fields are invalid".to_string(),
                    errors: Some(errors),
                }
                .into_response()
            }
            ApiError::NotFound { .. } => {
                let message = self.to_string();
                debug!(error = %message, "document not found");
                ErrorMessage::from((StatusCode::NOT_FOUND, message)).into_response()
            }
            ApiError::Conflict { .. } => {
                let message = self.to_string();
                debug!(error = %message, "document already exists");
                ErrorMessage::from((StatusCode::CONFLICT, message)).into_response()
            }
            ApiError::BadRequest(message) => {
                debug!(error = %message, "bad request");
                ErrorMessage::from((StatusCode::BAD_REQUEST, message)).into_response()
            }
            ApiError::Store(e) => {
                error!(error = ?e, "document store error");
                ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, "internal server error"))
                    .into_response()
            }
        }
    }
}

fn serialize_status<S>(value: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(value.as_u16())
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, String)) -> Self {
        Self {
            status_code,
            message,
            errors: None,
        }
    }
}

impl From<(StatusCode, &str)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, &str)) -> Self {
        Self {
            status_code,
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
