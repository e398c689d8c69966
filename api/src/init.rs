use axum::Router;
use axum::http::{HeaderValue, Method, header};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use app::config::Config;
use app::state::AppState;

use crate::openapi::ApiDoc;
use crate::routers::create_router;

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::OPTIONS, Method::GET, Method::POST])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE]);

    match config.allowed_origin.as_deref() {
        Some(origin) => cors
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .expect("Failed to parse allowed origin"),
            )
            .allow_credentials(true),
        None => cors.allow_origin(Any),
    }
}

pub fn setup_router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .nest("/api", create_router(state))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}

pub fn setup_config() -> Config {
    dotenvy::dotenv().ok();
    Config::from_env()
}

pub async fn setup_db(db_url: &str) -> DatabaseConnection {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_lifetime(std::time::Duration::from_secs(60))
        .sqlx_logging(false);

    if db_url.starts_with("sqlite") {
        opt.max_connections(5);
    } else {
        opt.min_connections(2).max_connections(20);
    }

    Database::connect(opt)
        .await
        .expect("Database connection failed")
}
