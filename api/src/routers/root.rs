use axum::{Router, extract::State, response::IntoResponse, routing::get};
use sea_orm::{ConnectionTrait, Statement};

use app::state::AppState;

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::Json;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Database reachable", body = ApiResponse<String>))
)]
pub async fn health_get(state: State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .conn
        .query_one(Statement::from_string(
            state.conn.get_database_backend(),
            "SELECT 'ok'",
        ))
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Query result not found".to_string()))?;
    let db: String = result.try_get_by(0)?;

    Ok(Json(ApiResponse::success("Service healthy", Some(db))))
}

pub fn create_root_router() -> Router<AppState> {
    Router::new().route("/health", get(health_get))
}
