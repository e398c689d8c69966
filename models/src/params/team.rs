use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::de::{blank_as_none, lenient_age, trimmed};
use super::validation::{validate_email_domain, validate_phone};
use crate::domains::sea_orm_active_enums::MemberRole;

#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberParams {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Member name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid member email"), custom(function = "validate_email_domain"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_phone"))]
    pub whatsapp: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub college: Option<String>,
    #[serde(default, alias = "district", deserialize_with = "blank_as_none")]
    pub address: Option<String>,
    /// Explicit role on roster edits; positional when absent.
    #[serde(default)]
    pub role: Option<MemberRole>,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamParams {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Team name is required"))]
    pub team_name: String,
    #[validate(email(message = "Invalid leader email"), custom(function = "validate_email_domain"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub event: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub transaction_id: Option<String>,
    #[validate(
        length(min = 1, max = 5, message = "A team has between 1 and 5 members"),
        nested
    )]
    pub members: Vec<MemberParams>,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    #[validate(length(min = 1, message = "Team ID is required"))]
    pub login_id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMembersParams {
    #[validate(length(max = 5, message = "A team has at most 5 members"), nested)]
    pub members: Vec<MemberParams>,
}

#[derive(Deserialize, Validate, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordParams {
    #[validate(length(min = 1))]
    pub team_id: String,
    pub old_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}
