use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::de::trimmed;
use super::validation::validate_email_domain;

#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct SendVerificationOtpParams {
    #[validate(email(message = "Email required"), custom(function = "validate_email_domain"))]
    pub email: String,
    pub name: Option<String>,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
pub struct VerifyEmailOtpParams {
    #[validate(email)]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 6, max = 6))]
    pub otp: String,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestPasswordResetParams {
    #[validate(length(min = 1))]
    pub team_id: String,
    pub old_password: String,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetOtpParams {
    #[validate(length(min = 1))]
    pub team_id: String,
    #[serde(deserialize_with = "trimmed")]
    pub otp: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}
