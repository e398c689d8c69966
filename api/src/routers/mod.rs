use axum::Router;

pub mod admin;
pub mod auth;
pub mod payment;
pub mod root;
pub mod team;

use admin::create_admin_router;
use app::state::AppState;
use auth::create_auth_router;
use payment::create_payment_router;
use root::create_root_router;
use team::create_team_router;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_root_router())
        .nest("/auth", create_auth_router())
        .nest("/team", create_team_router(state.clone()))
        .nest("/payment", create_payment_router())
        .nest("/admin", create_admin_router(state.clone()))
        .with_state(state)
}
