use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use app::error::TeamError;
use app::state::AppState;
use app::utils::decode_data;
use models::schemas::team::{AdminSession, TeamSession};

use crate::error::ApiError;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid admin token.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(TeamError::TokenRequired)?;
    let session: AdminSession =
        decode_data(&state.config, token).map_err(|_| TeamError::Unauthorized)?;
    if !session.admin {
        return Err(TeamError::Unauthorized.into());
    }

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Requires a team token. Handlers compare the session against the team
/// named in the path.
pub async fn require_team(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(TeamError::TokenRequired)?;
    let session: TeamSession =
        decode_data(&state.config, token).map_err(|_| TeamError::Unauthorized)?;

    tracing::debug!(team_id = %session.team_id, "Team session resolved");
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
