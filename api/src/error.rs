use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::{ValidationErrors, ValidationErrorsKind};

use app::error::TeamError;

use crate::ApiResponse;
use crate::models::ValidationErrorResponse;

/// Handler error. Wraps anything convertible into `anyhow::Error` and picks
/// the status code by looking at what is inside.
#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(ApiResponse::<()>::error(message))).into_response()
}

/// First human readable message in a (possibly nested) validation report.
pub(crate) fn first_message(errors: &ValidationErrors) -> Option<String> {
    for (field, kind) in errors.errors() {
        let found = match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {field}"),
            }),
            ValidationErrorsKind::Struct(inner) => first_message(inner),
            ValidationErrorsKind::List(items) => items.values().find_map(|e| first_message(e)),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<TeamError>() {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!("{:#}", self.0);
            } else {
                tracing::debug!(%status, "{}", err);
            }
            return error_body(status, &err.to_string());
        }

        if let Some(errors) = self.0.downcast_ref::<ValidationErrors>() {
            let message = first_message(errors).unwrap_or_else(|| "Validation error".to_string());
            let body = ValidationErrorResponse::new(message, errors);
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return error_body(rejection.status(), &rejection.body_text());
        }
        if let Some(rejection) = self.0.downcast_ref::<PathRejection>() {
            return error_body(rejection.status(), &rejection.body_text());
        }
        if let Some(rejection) = self.0.downcast_ref::<MultipartRejection>() {
            return error_body(rejection.status(), &rejection.body_text());
        }
        if let Some(err) = self.0.downcast_ref::<MultipartError>() {
            return error_body(err.status(), &err.body_text());
        }

        tracing::error!("Internal error: {:#}", self.0);
        error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
