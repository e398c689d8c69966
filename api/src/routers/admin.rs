use axum::{
    Router,
    extract::State,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};

use app::config::Config;
use app::error::TeamError;
use app::persistence::attendance::{
    VerifiedPayment, list_attendance, mark_present, verify_payment,
};
use app::persistence::teams::{admin_update_team, list_teams_with_members};
use app::state::AppState;
use app::utils::email::{PaymentVerified, send_payment_verified_email};
use app::utils::encode_data;
use app::utils::qr::{png_data_url, render_payload_png};
use models::params::admin::{
    AdminLoginParams, AdminUpdateTeamParams, MarkAttendanceParams, VerifyPaymentParams,
};
use models::schemas::attendance::{
    AttendanceSchema, MarkAttendanceSchema, PaymentVerifiedSchema, QrPayload,
};
use models::schemas::team::{AdminLoginSchema, AdminSession, TeamWithMembersSchema};

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::{Json, Valid};
use crate::middleware::auth::require_admin;

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = AdminLoginParams,
    responses(
        (status = 200, description = "Admin token issued", body = ApiResponse<AdminLoginSchema>),
        (status = 401, description = "Wrong password"),
        (status = 500, description = "Admin password not configured"),
    )
)]
pub async fn admin_login_post(
    State(state): State<AppState>,
    Json(params): Json<AdminLoginParams>,
) -> Result<impl IntoResponse, ApiError> {
    let expected = state
        .config
        .admin_password
        .as_deref()
        .ok_or_else(|| TeamError::Config("Admin configuration error".to_string()))?;
    if params.password != expected {
        tracing::warn!("Rejected admin login");
        return Err(TeamError::Unauthorized.into());
    }

    let token = encode_data(&state.config, AdminSession { admin: true })?;
    Ok(Json(ApiResponse::success(
        "Admin login successful",
        Some(AdminLoginSchema { token }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/data",
    tag = "admin",
    responses(
        (status = 200, description = "All teams with members", body = ApiResponse<Vec<TeamWithMembersSchema>>),
        (status = 401, description = "Missing or invalid admin token"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_data_get(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let teams: Vec<TeamWithMembersSchema> = list_teams_with_members(&state.conn)
        .await?
        .into_iter()
        .map(TeamWithMembersSchema::from)
        .collect();

    Ok(Json(ApiResponse::success(
        "Teams retrieved successfully",
        Some(teams),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/update_team",
    tag = "admin",
    request_body = AdminUpdateTeamParams,
    responses(
        (status = 200, description = "Team updated", body = ApiResponse<TeamWithMembersSchema>),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Name or phone already taken"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_update_team_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<AdminUpdateTeamParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = admin_update_team(&state.conn, params).await?;

    Ok(Json(ApiResponse::success(
        "Team updated successfully",
        Some(TeamWithMembersSchema::from(updated)),
    )))
}

/// Mails the gate pass to the team leader. Runs detached from the request.
async fn notify_payment_verified(
    config: Config,
    to: String,
    leader_name: String,
    qr: QrPayload,
    qr_png: Vec<u8>,
) {
    let verified = PaymentVerified {
        leader_name: &leader_name,
        team_name: &qr.team_name,
        team_id: &qr.team_id,
        qr_png,
    };
    if let Err(e) = send_payment_verified_email(&config, &to, verified).await {
        tracing::error!(team_id = %qr.team_id, %to, "Payment confirmation email failed: {:#}", e);
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/verify_payment",
    tag = "admin",
    request_body = VerifyPaymentParams,
    responses(
        (status = 200, description = "Payment verified, gate QR issued", body = ApiResponse<PaymentVerifiedSchema>),
        (status = 404, description = "Team not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn verify_payment_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<VerifyPaymentParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let VerifiedPayment {
        team,
        leader,
        attendance,
    } = verify_payment(&state.conn, params.team_id.trim()).await?;

    let qr = QrPayload::from(&attendance);
    let png = render_payload_png(&qr)?;
    let qr_image = png_data_url(&png);

    match leader.and_then(|l| l.email.map(|email| (email, l.name))) {
        Some((email, leader_name)) => {
            tokio::spawn(notify_payment_verified(
                state.config.clone(),
                email,
                leader_name,
                qr.clone(),
                png,
            ));
        }
        None => tracing::warn!(team_id = %team.team_id, "No leader email, gate pass not mailed"),
    }

    Ok(Json(ApiResponse::success(
        "Payment verified and QR code generated",
        Some(PaymentVerifiedSchema { qr, qr_image }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/attendance",
    tag = "admin",
    responses(
        (status = 200, description = "Attendance rows", body = ApiResponse<Vec<AttendanceSchema>>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn attendance_get(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows: Vec<AttendanceSchema> = list_attendance(&state.conn)
        .await?
        .into_iter()
        .map(AttendanceSchema::from)
        .collect();

    Ok(Json(ApiResponse::success(
        "Attendance retrieved successfully",
        Some(rows),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/attendance/mark",
    tag = "admin",
    request_body = MarkAttendanceParams,
    responses(
        (status = 200, description = "Team checked in", body = ApiResponse<MarkAttendanceSchema>),
        (status = 404, description = "Payment not verified for this team"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn attendance_mark_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<MarkAttendanceParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let (row, already_present) = mark_present(&state.conn, &params.team_id).await?;
    let message = if already_present {
        format!("Team {} already checked in", row.team_name)
    } else {
        format!("Attendance marked for {}", row.team_name)
    };

    Ok(Json(ApiResponse::success(
        &message,
        Some(MarkAttendanceSchema {
            attendance: AttendanceSchema::from(row),
            already_present,
        }),
    )))
}

pub fn create_admin_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/data", get(admin_data_get))
        .route("/update_team", post(admin_update_team_post))
        .route("/verify_payment", post(verify_payment_post))
        .route("/attendance", get(attendance_get))
        .route("/attendance/mark", post(attendance_mark_post))
        .route_layer(from_fn_with_state(state, require_admin));

    Router::new()
        .route("/login", post(admin_login_post))
        .merge(protected)
}
