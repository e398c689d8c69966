use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use app::config::Config;
use app::error::TeamError;
use app::persistence::teams::{
    check_current_password, create_team, email_registered, find_leader, login_team,
    update_password,
};
use app::state::AppState;
use app::utils::email::{
    Credentials, send_password_reset_email, send_registration_email, send_verification_otp_email,
};
use app::utils::encode_data;
use app::utils::otp::mask_email;
use app::utils::whatsapp::send_whatsapp;
use models::domains::sea_orm_active_enums::MemberRole;
use models::domains::{members, teams};
use models::params::otp::{
    RequestPasswordResetParams, SendVerificationOtpParams, VerifyEmailOtpParams,
    VerifyResetOtpParams,
};
use models::params::team::{ChangePasswordParams, LoginParams, RegisterTeamParams};
use models::schemas::team::{LoginSchema, RegisteredTeamSchema, TeamSession, TeamSummarySchema};

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::{Json, Valid};

/// Confirmation mail to every member with an address, plus the leader's
/// WhatsApp ping. Runs detached from the request.
async fn notify_registration(
    config: Config,
    team: teams::Model,
    members: Vec<members::Model>,
    password: String,
) {
    for member in &members {
        let Some(email) = member.email.as_deref() else {
            continue;
        };
        let credentials = (member.role == MemberRole::Leader).then(|| Credentials {
            team_id: &team.team_id,
            password: &password,
        });
        if let Err(e) = send_registration_email(&config, email, &member.name, credentials).await {
            tracing::error!(team_id = %team.team_id, %email, "Registration email failed: {:#}", e);
        }
    }

    let leader_whatsapp = members
        .iter()
        .find(|m| m.role == MemberRole::Leader)
        .and_then(|m| m.whatsapp.as_deref());
    if let Some(number) = leader_whatsapp {
        send_whatsapp(
            number,
            &format!(
                "Registration for {} received. Team ID: {}",
                config.event_name, team.team_id
            ),
        );
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterTeamParams,
    responses(
        (status = 201, description = "Team registered", body = ApiResponse<RegisteredTeamSchema>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Team name, email or phone already taken"),
    )
)]
pub async fn register_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<RegisterTeamParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let password = params.password.clone();
    let (team, members) = create_team(&state.conn, &state.config.team_id_prefix, params).await?;

    let data = RegisteredTeamSchema {
        team_id: team.team_id.clone(),
        team_name: team.name.clone(),
    };
    tokio::spawn(notify_registration(
        state.config.clone(),
        team,
        members,
        password,
    ));

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Team registered successfully", Some(data))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/send-verification-otp",
    tag = "auth",
    request_body = SendVerificationOtpParams,
    responses(
        (status = 200, description = "OTP sent", body = ApiResponse<String>),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn send_verification_otp_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<SendVerificationOtpParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let email = params.email.trim();
    if email_registered(&state.conn, email).await? {
        return Err(TeamError::Duplicate("This email is already registered.".to_string()).into());
    }

    let otp = state.email_otps.issue(email);
    send_verification_otp_email(&state.config, email, params.name.as_deref(), &otp)
        .await
        .map_err(|e| {
            tracing::error!(%email, "Verification email failed: {:#}", e);
            TeamError::Mail("Failed to send email. Check address.".to_string())
        })?;

    Ok(Json(ApiResponse::<()>::success(
        &format!("OTP sent to {email}"),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/verify-email-otp",
    tag = "auth",
    request_body = VerifyEmailOtpParams,
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Invalid or expired OTP"),
    )
)]
pub async fn verify_email_otp_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<VerifyEmailOtpParams>>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .email_otps
        .verify(params.email.trim(), &params.otp)
        .map_err(|e| match e {
            TeamError::OtpMissing => TeamError::OtpInvalid,
            e => e,
        })?;

    Ok(Json(ApiResponse::<()>::success(
        "Email verified successfully",
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginParams,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginSchema>),
        (status = 401, description = "Unknown team or wrong password"),
    )
)]
pub async fn login_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<LoginParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team = login_team(&state.conn, params).await?;
    let token = encode_data(
        &state.config,
        TeamSession {
            team_id: team.team_id.clone(),
        },
    )?;

    let data = LoginSchema {
        team: TeamSummarySchema::from(team),
        token,
    };
    Ok(Json(ApiResponse::success("Login successful", Some(data))))
}

#[utoipa::path(
    post,
    path = "/api/auth/request-password-reset",
    tag = "auth",
    request_body = RequestPasswordResetParams,
    responses(
        (status = 200, description = "OTP sent to the leader's email"),
        (status = 401, description = "Old password does not match"),
        (status = 404, description = "Team not found"),
    )
)]
pub async fn request_password_reset_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<RequestPasswordResetParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team = check_current_password(&state.conn, params.team_id.trim(), &params.old_password)
        .await?;
    let leader_email = find_leader(&state.conn, team.id)
        .await?
        .and_then(|leader| leader.email)
        .ok_or_else(|| TeamError::Validation("Leader email not found. Contact Admin.".to_string()))?;

    let otp = state.reset_otps.issue(&team.team_id);
    send_password_reset_email(&state.config, &leader_email, &otp)
        .await
        .map_err(|e| {
            tracing::error!(team_id = %team.team_id, "Password reset email failed: {:#}", e);
            TeamError::Mail("Failed to send OTP email.".to_string())
        })?;

    Ok(Json(ApiResponse::<()>::success(
        &format!("OTP sent to leader's email ({})", mask_email(&leader_email)),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/verify-reset-otp",
    tag = "auth",
    request_body = VerifyResetOtpParams,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Missing, expired or wrong OTP"),
    )
)]
pub async fn verify_reset_otp_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<VerifyResetOtpParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team_id = params.team_id.trim();
    state.reset_otps.verify(team_id, &params.otp)?;
    update_password(&state.conn, team_id, &params.new_password).await?;

    Ok(Json(ApiResponse::<()>::success(
        "Password updated successfully",
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = "auth",
    request_body = ChangePasswordParams,
    responses(
        (status = 200, description = "Password updated"),
        (status = 401, description = "Old password does not match"),
    )
)]
pub async fn change_password_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<ChangePasswordParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team = check_current_password(&state.conn, params.team_id.trim(), &params.old_password)
        .await?;
    update_password(&state.conn, &team.team_id, &params.new_password).await?;

    Ok(Json(ApiResponse::<()>::success(
        "Password updated successfully",
        None,
    )))
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_post))
        .route("/send-verification-otp", post(send_verification_otp_post))
        .route("/verify-email-otp", post(verify_email_otp_post))
        .route("/login", post(login_post))
        .route("/request-password-reset", post(request_password_reset_post))
        .route("/verify-reset-otp", post(verify_reset_otp_post))
        .route("/change-password", post(change_password_post))
}
