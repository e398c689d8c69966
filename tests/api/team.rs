use axum::http::StatusCode;
use serde_json::json;

use super::spawn_app;

#[tokio::test]
async fn dashboard_requires_own_token() {
    let app = spawn_app().await;
    let alpha = app
        .register("alpha", "lead@alpha.com", &["9000000001", "9000000002"])
        .await;
    let beta = app.register("beta", "lead@beta.com", &["9000000003"]).await;
    let alpha_token = app.team_token(&alpha).await;

    let (status, body) = app.get(&format!("/api/team/{alpha}"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    let (status, _) = app
        .get(&format!("/api/team/{alpha}"), Some("not-a-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .get(&format!("/api/team/{beta}"), Some(&alpha_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .get(&format!("/api/team/{alpha}"), Some(&alpha_token))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["team"]["teamId"], alpha.as_str());
    assert_eq!(body["data"]["team"]["status"], "PENDING");
    assert!(body["data"]["team"].get("passwordHash").is_none());

    let members = body["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["role"], "LEADER");
    assert_eq!(members[0]["address"], "Chennai");
    assert_eq!(members[0]["age"], 21);
    assert_eq!(members[1]["role"], "MEMBER");
}

#[tokio::test]
async fn roster_update_replaces_members() {
    let app = spawn_app().await;
    let alpha = app
        .register("alpha", "lead@alpha.com", &["9000000001", "9000000002"])
        .await;
    app.register("beta", "lead@beta.com", &["9000000003"]).await;
    let token = app.team_token(&alpha).await;
    let uri = format!("/api/team/{alpha}/update");

    let (status, body) = app
        .post_json(
            &uri,
            json!({ "members": [
                { "name": "New Lead", "phone": "9000000009" },
                { "name": "Helper", "phone": "", "role": "MEMBER" },
                { "name": "Second", "role": "LEADER" },
            ] }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let members = body["data"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["role"], "LEADER");
    assert_eq!(members[1]["role"], "MEMBER");
    assert!(members[1]["phone"].is_null());
    assert_eq!(members[2]["role"], "LEADER");

    let (status, body) = app
        .post_json(
            &uri,
            json!({ "members": [{ "name": "Thief", "phone": "9000000003" }] }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, _) = app
        .post_json(&uri, json!({ "members": [] }), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/team/{alpha}"), Some(&token)).await;
    assert_eq!(body["data"]["members"].as_array().unwrap().len(), 0);
}
