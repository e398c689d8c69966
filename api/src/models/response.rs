use serde::Serialize;

/// Body of a 400 produced by field validation. `details` carries the full
/// per-field report so forms can highlight every offending input.
#[derive(Serialize)]
pub struct ValidationErrorResponse<T> {
    pub success: bool,
    pub message: String,
    pub details: T,
}

impl<T> ValidationErrorResponse<T> {
    pub fn new(message: String, details: T) -> Self {
        Self {
            success: false,
            message,
            details,
        }
    }
}
