use std::sync::atomic::{AtomicUsize, Ordering};

use api::setup_router;
use app::config::{Config, ConfigInner};
use app::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use utils::testing::setup_test_db;

mod admin;
mod auth;
mod team;

pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const TEAM_PASSWORD: &str = "secret123";

static NEXT_APP: AtomicUsize = AtomicUsize::new(0);

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    let conn = setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!");
    let config = Config::from(ConfigInner {
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        uploads_dir: std::env::temp_dir().join(format!(
            "hackreg-uploads-{}-{}",
            std::process::id(),
            NEXT_APP.fetch_add(1, Ordering::Relaxed)
        )),
        ..ConfigInner::defaults("test-secret")
    });
    let state = AppState::new(conn, config);

    TestApp {
        router: setup_router(state.clone()),
        state,
    }
}

/// Registration body with one member per phone; the first member leads.
pub fn registration(team: &str, email: &str, phones: &[&str]) -> Value {
    let members: Vec<Value> = phones
        .iter()
        .enumerate()
        .map(|(i, phone)| {
            json!({
                "name": format!("{team} member {i}"),
                "age": "21",
                "email": format!("{team}.{i}@example.com"),
                "phone": phone,
                "whatsapp": phone,
                "college": "Prathyusha Engineering College",
                "district": "Chennai",
            })
        })
        .collect();

    json!({
        "teamName": team,
        "email": email,
        "password": TEAM_PASSWORD,
        "event": "CTF",
        "members": members,
    })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Registers a team and returns its display id.
    pub async fn register(&self, team: &str, email: &str, phones: &[&str]) -> String {
        let (status, body) = self
            .post_json("/api/auth/register", registration(team, email, phones), None)
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["teamId"].as_str().unwrap().to_string()
    }

    pub async fn team_token(&self, login_id: &str) -> String {
        let (status, body) = self
            .post_json(
                "/api/auth/login",
                json!({ "loginId": login_id, "password": TEAM_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post_json(
                "/api/admin/login",
                json!({ "password": ADMIN_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn health_checks_database() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "ok");
}
