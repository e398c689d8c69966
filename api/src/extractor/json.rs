use axum::{
    extract::{FromRequest, Json as AxumJson},
    response::{IntoResponse, Response},
};
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// `axum::Json` whose rejections render through [`ApiError`], so malformed
/// bodies get the same `{success, message}` envelope as every other error.
#[derive(FromRequest)]
#[from_request(via(AxumJson), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    AxumJson<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl<T: Validate> Validate for Json<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.0.validate()
    }
}
