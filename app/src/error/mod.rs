use axum::http::StatusCode;

/// Failures the client is expected to act on. Anything else surfacing from
/// persistence is treated as an internal error by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("Team not found")]
    NotFound,
    #[error("No attendance record found. Payment has not been verified.")]
    NoAttendance,
    #[error("Team ID not found")]
    UnknownLogin,
    #[error("Enter the correct password")]
    WrongPassword,
    #[error("Incorrect old password")]
    WrongOldPassword,
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Validation(String),
    #[error("No OTP request found or expired.")]
    OtpMissing,
    #[error("OTP expired. Please request again.")]
    OtpExpired,
    #[error("Invalid OTP")]
    OtpInvalid,
    #[error("Invalid Credentials")]
    Unauthorized,
    #[error("Authentication required")]
    TokenRequired,
    #[error("Access denied for this team")]
    Forbidden,
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Mail(String),
}

impl TeamError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::NoAttendance => StatusCode::NOT_FOUND,
            Self::UnknownLogin
            | Self::WrongPassword
            | Self::WrongOldPassword
            | Self::Unauthorized
            | Self::TokenRequired => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::OtpMissing | Self::OtpExpired | Self::OtpInvalid => {
                StatusCode::BAD_REQUEST
            }
            Self::Config(_) | Self::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
