use axum::http::StatusCode;
use serde_json::json;

use super::{TEAM_PASSWORD, registration, spawn_app};

#[tokio::test]
async fn register_assigns_display_ids() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("alpha", "lead@alpha.com", &["9000000001", "9000000002"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["teamId"], "Xctf26te0001");
    assert_eq!(body["data"]["teamName"], "alpha");

    let second = app.register("beta", "lead@beta.com", &["9000000003"]).await;
    assert_eq!(second, "Xctf26te0002");
}

#[tokio::test]
async fn register_rejects_duplicates() {
    let app = spawn_app().await;
    app.register("alpha", "lead@alpha.com", &["9000000001"]).await;

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("alpha", "other@alpha.com", &["9000000002"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Team Name is already taken.");

    let (status, _) = app
        .post_json(
            "/api/auth/register",
            registration("beta", "lead@alpha.com", &["9000000002"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("beta", "lead@beta.com", &["9000000001"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("9000000001"));

    let (status, _) = app
        .post_json(
            "/api/auth/register",
            registration("beta", "lead@beta.com", &["9000000005", "9000000005"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_reused_utr() {
    let app = spawn_app().await;

    let mut first = registration("alpha", "lead@alpha.com", &["9000000001"]);
    first["transactionId"] = json!("UTR123456");
    let (status, body) = app.post_json("/api/auth/register", first, None).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let mut second = registration("beta", "lead@beta.com", &["9000000002"]);
    second["transactionId"] = json!("  UTR123456 ");
    let (status, body) = app.post_json("/api/auth/register", second, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This UTR number has already been used by another team.");
}

#[tokio::test]
async fn register_rejects_blank_names() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("   ", "lead@alpha.com", &["9000000001"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Team name is required");

    let mut blank_member = registration("alpha", "lead@alpha.com", &["9000000001"]);
    blank_member["members"][0]["name"] = json!("   ");
    let (status, body) = app.post_json("/api/auth/register", blank_member, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Member name is required");

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("  alpha  ", "lead@alpha.com", &["9000000001"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["teamName"], "alpha");
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("alpha", "lead@alpha.com", &[]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            registration("alpha", "lead@alpha.com", &["12345"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Phone number must be exactly 10 digits");

    let (status, _) = app
        .post_json(
            "/api/auth/register",
            registration("alpha", "lead@gmail", &["9000000001"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/api/auth/register",
            registration(
                "alpha",
                "lead@alpha.com",
                &[
                    "9000000001",
                    "9000000002",
                    "9000000003",
                    "9000000004",
                    "9000000005",
                    "9000000006",
                ],
            ),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post_json("/api/auth/register", json!({ "teamName": 1 }), None)
        .await;
    assert!(status.is_client_error());
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_by_id_name_or_email() {
    let app = spawn_app().await;
    let team_id = app.register("alpha", "lead@alpha.com", &["9000000001"]).await;

    for login_id in [team_id.as_str(), "alpha", "lead@alpha.com"] {
        let (status, body) = app
            .post_json(
                "/api/auth/login",
                json!({ "loginId": login_id, "password": TEAM_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{login_id}: {body}");
        assert_eq!(body["data"]["team"]["id"], team_id.as_str());
        assert_eq!(body["data"]["team"]["email"], "lead@alpha.com");
        assert!(body["data"]["token"].as_str().is_some());
    }

    let (status, body) = app
        .post_json(
            "/api/auth/login",
            json!({ "loginId": team_id, "password": "wrong-password" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Enter the correct password");

    let (status, body) = app
        .post_json(
            "/api/auth/login",
            json!({ "loginId": "Xctf26te9999", "password": TEAM_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Team ID not found");
}

#[tokio::test]
async fn email_verification_otp() {
    let app = spawn_app().await;
    app.register("alpha", "lead@alpha.com", &["9000000001"]).await;

    let (status, _) = app
        .post_json(
            "/api/auth/send-verification-otp",
            json!({ "email": "lead@alpha.com" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post_json(
            "/api/auth/send-verification-otp",
            json!({ "email": "lead@gmial" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post_json(
            "/api/auth/send-verification-otp",
            json!({ "email": "new@beta.com", "name": "Bea" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(app.state.email_otps.is_pending("new@beta.com"));

    let (status, body) = app
        .post_json(
            "/api/auth/verify-email-otp",
            json!({ "email": "unknown@beta.com", "otp": "123456" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid OTP");

    let code = app.state.email_otps.issue("new@beta.com");
    let (status, _) = app
        .post_json(
            "/api/auth/verify-email-otp",
            json!({ "email": "new@beta.com", "otp": format!(" {code} ") }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!app.state.email_otps.is_pending("new@beta.com"));
}

#[tokio::test]
async fn password_reset_with_otp() {
    let app = spawn_app().await;
    let team_id = app.register("alpha", "lead@alpha.com", &["9000000001"]).await;

    let (status, _) = app
        .post_json(
            "/api/auth/request-password-reset",
            json!({ "teamId": team_id, "oldPassword": "not-it" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post_json(
            "/api/auth/request-password-reset",
            json!({ "teamId": "Xctf26te9999", "oldPassword": TEAM_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .post_json(
            "/api/auth/request-password-reset",
            json!({ "teamId": team_id, "oldPassword": TEAM_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["message"].as_str().unwrap().contains("al***@example.com"));

    // Replace the mailed code with one the test can see.
    let code = app.state.reset_otps.issue(&team_id);
    let wrong = "012345";

    let (status, body) = app
        .post_json(
            "/api/auth/verify-reset-otp",
            json!({ "teamId": team_id, "otp": wrong, "newPassword": "fresh-pass" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid OTP");

    let (status, _) = app
        .post_json(
            "/api/auth/verify-reset-otp",
            json!({ "teamId": team_id, "otp": code, "newPassword": "fresh-pass" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post_json(
            "/api/auth/verify-reset-otp",
            json!({ "teamId": team_id, "otp": code, "newPassword": "other-pass" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No OTP request found or expired.");

    let (status, _) = app
        .post_json(
            "/api/auth/login",
            json!({ "loginId": team_id, "password": "fresh-pass" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn change_password_requires_old_password() {
    let app = spawn_app().await;
    let team_id = app.register("alpha", "lead@alpha.com", &["9000000001"]).await;

    let (status, body) = app
        .post_json(
            "/api/auth/change-password",
            json!({ "teamId": team_id, "oldPassword": "guess", "newPassword": "fresh-pass" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Incorrect old password");

    let (status, _) = app
        .post_json(
            "/api/auth/change-password",
            json!({ "teamId": team_id, "oldPassword": TEAM_PASSWORD, "newPassword": "fresh-pass" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post_json(
            "/api/auth/login",
            json!({ "loginId": team_id, "password": TEAM_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
