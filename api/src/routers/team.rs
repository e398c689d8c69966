use axum::{
    Extension, Router,
    extract::{Path, State},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};

use app::error::TeamError;
use app::persistence::teams::{get_team_with_members, replace_members};
use app::state::AppState;
use models::params::team::UpdateMembersParams;
use models::schemas::team::{DashboardSchema, MemberSchema, TeamSession};

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::{Json, Valid};
use crate::middleware::auth::require_team;

fn ensure_own_team(session: &TeamSession, team_id: &str) -> Result<(), TeamError> {
    if session.team_id != team_id {
        return Err(TeamError::Forbidden);
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/team/{id}",
    tag = "team",
    params(("id" = String, Path, description = "Team display id")),
    responses(
        (status = 200, description = "Team dashboard", body = ApiResponse<DashboardSchema>),
        (status = 403, description = "Token belongs to another team"),
        (status = 404, description = "Team not found"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn team_get(
    State(state): State<AppState>,
    Extension(session): Extension<TeamSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_own_team(&session, &id)?;
    let dashboard = DashboardSchema::from(get_team_with_members(&state.conn, &id).await?);

    Ok(Json(ApiResponse::success(
        "Team retrieved successfully",
        Some(dashboard),
    )))
}

#[utoipa::path(
    post,
    path = "/api/team/{id}/update",
    tag = "team",
    params(("id" = String, Path, description = "Team display id")),
    request_body = UpdateMembersParams,
    responses(
        (status = 200, description = "Roster replaced", body = ApiResponse<Vec<MemberSchema>>),
        (status = 403, description = "Token belongs to another team"),
        (status = 409, description = "Phone number already registered"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn team_update_post(
    State(state): State<AppState>,
    Extension(session): Extension<TeamSession>,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<UpdateMembersParams>>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_own_team(&session, &id)?;
    let members = replace_members(&state.conn, &id, params.members).await?;
    let members: Vec<MemberSchema> = members.into_iter().map(MemberSchema::from).collect();

    Ok(Json(ApiResponse::success(
        "Team updated successfully",
        Some(members),
    )))
}

pub fn create_team_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", get(team_get))
        .route("/{id}/update", post(team_update_post))
        .route_layer(from_fn_with_state(state, require_team))
}
