use axum::http::StatusCode;
use serde_json::json;

use super::spawn_app;

#[tokio::test]
async fn admin_login_checks_password() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json("/api/admin/login", json!({ "password": "guess" }), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let token = app.admin_token().await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn admin_routes_reject_missing_or_foreign_tokens() {
    let app = spawn_app().await;
    let team_id = app.register("alpha", "lead@alpha.com", &["9000000001"]).await;
    let team_token = app.team_token(&team_id).await;

    let (status, _) = app.get("/api/admin/data", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/admin/data", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/admin/attendance", Some(&team_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post_json(
            "/api/admin/verify_payment",
            json!({ "teamId": team_id }),
            Some(&team_token),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_lists_and_edits_teams() {
    let app = spawn_app().await;
    let alpha = app
        .register("alpha", "lead@alpha.com", &["9000000001", "9000000002"])
        .await;
    app.register("beta", "lead@beta.com", &["9000000003"]).await;
    let token = app.admin_token().await;

    let (status, body) = app.get("/api/admin/data", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let teams = body["data"].as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0]["teamId"], alpha.as_str());
    assert_eq!(teams[0]["members"].as_array().unwrap().len(), 2);
    assert!(teams[0].get("passwordHash").is_none());

    let (status, _) = app
        .post_json(
            "/api/admin/update_team",
            json!({ "teamId": alpha, "name": "beta", "members": [] }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post_json(
            "/api/admin/update_team",
            json!({ "teamId": alpha, "name": "  ", "members": [] }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Team name is required");

    let (status, body) = app
        .post_json(
            "/api/admin/update_team",
            json!({
                "teamId": alpha,
                "name": "alpha prime",
                "event": "Hackathon",
                "password": "reset-by-admin",
                "members": [{ "name": "Solo", "phone": "9000000001" }],
            }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "alpha prime");
    assert_eq!(body["data"]["event"], "Hackathon");
    assert_eq!(body["data"]["members"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .post_json(
            "/api/auth/login",
            json!({ "loginId": alpha, "password": "reset-by-admin" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn payment_verification_and_check_in() {
    let app = spawn_app().await;
    let team_id = app
        .register("alpha", "lead@alpha.com", &["9000000001", "9000000002"])
        .await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post_json(
            "/api/admin/attendance/mark",
            json!({ "teamId": team_id }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    for _ in 0..2 {
        let (status, body) = app
            .post_json(
                "/api/admin/verify_payment",
                json!({ "teamId": team_id }),
                Some(&token),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["qr"]["teamId"], team_id.as_str());
        assert_eq!(body["data"]["qr"]["teamName"], "alpha");
        assert_eq!(body["data"]["qr"]["leaderName"], "alpha member 0");
        assert_eq!(body["data"]["qr"]["leaderPhone"], "9000000001");
        assert!(
            body["data"]["qrImage"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }

    let (_, body) = app.get("/api/admin/attendance", Some(&token)).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "ABSENT");
    assert!(rows[0]["entryTime"].is_null());

    let (_, body) = app.get("/api/admin/data", Some(&token)).await;
    assert_eq!(body["data"][0]["paymentVerified"], true);
    assert_eq!(body["data"][0]["status"], "CONFIRMED");

    // The scanner posts the QR payload as-is.
    let scanned = json!({
        "teamId": team_id,
        "teamName": "alpha",
        "leaderName": "alpha member 0",
        "leaderPhone": "9000000001",
    });
    let (status, body) = app
        .post_json("/api/admin/attendance/mark", scanned.clone(), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["alreadyPresent"], false);
    assert_eq!(body["data"]["attendance"]["status"], "PRESENT");
    let entry_time = body["data"]["attendance"]["entryTime"].clone();
    assert!(entry_time.is_string());

    let (status, body) = app
        .post_json("/api/admin/attendance/mark", scanned, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["alreadyPresent"], true);
    assert_eq!(body["data"]["attendance"]["entryTime"], entry_time);
}

#[tokio::test]
async fn verify_payment_for_unknown_team() {
    let app = spawn_app().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post_json(
            "/api/admin/verify_payment",
            json!({ "teamId": "Xctf26te0404" }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Team not found");
}
