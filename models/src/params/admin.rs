use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::de::{blank_as_none, trimmed};
use super::team::MemberParams;

#[derive(Deserialize, Debug, ToSchema)]
pub struct AdminLoginParams {
    pub password: String,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateTeamParams {
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub team_id: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Team name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub event: Option<String>,
    /// New plain-text password; left unchanged when blank.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(length(max = 5), nested)]
    pub members: Vec<MemberParams>,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentParams {
    #[validate(length(min = 1, message = "Team ID required"))]
    pub team_id: String,
}

/// Accepts the scanned QR payload as-is; only the team id is read.
#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceParams {
    #[validate(length(min = 1, message = "Team ID required"))]
    pub team_id: String,
}
