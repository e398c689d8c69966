mod error;
mod extractor;
mod init;
mod middleware;
mod openapi;

pub mod models;
pub mod routers;

pub use error::ApiError;
pub use init::{setup_config, setup_db, setup_router};
pub use openapi::ApiDoc;

use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for every JSON response. Errors carry `data: null`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    message: String,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &str, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            data,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_owned(),
            data: None,
        }
    }
}
