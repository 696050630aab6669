//! Integration tests for the authentication flow.

use axum::http::StatusCode;

use reunite_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "password": "password123",
                "display_name": "Kit",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "kit@example.com",
                "password": "short",
                "display_name": "Kit",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_blank_display_name() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "kit@example.com",
                "password": "password123",
                "display_name": "   ",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_another_key_is_rejected() {
    let app = TestApp::new().await;

    // Same claims, wrong signing key.
    let mut foreign = crate::helpers::test_config("postgres://unused");
    foreign.auth.jwt_secret = "a-different-signing-key".to_string();
    let issuer = reunite_auth::jwt::TokenIssuer::new(&foreign.auth).unwrap();
    let user = reunite_entity::user::User {
        id: uuid::Uuid::new_v4(),
        email: "kit@example.com".to_string(),
        password_hash: "unused".to_string(),
        display_name: "Kit".to_string(),
        roles: vec![UserRole::Admin],
        disabled: false,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    let token = issuer.issue(&user).unwrap().token;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_login_roundtrip() {
    let app = TestApp::with_database().await;
    app.create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;

    let tokens = app.login("kit@example.com", "password123").await;
    assert!(tokens["access_token"].is_string());
    assert!(tokens["refresh_token"].is_string());
    assert_eq!(tokens["user"]["email"], "kit@example.com");
    assert_eq!(tokens["user"]["roles"][0], "Member");

    let token = tokens["access_token"].as_str().unwrap();
    let response = app.request("GET", "/api/auth/me", None, Some(token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "kit@example.com");
    assert!(response.body["data"]["password_hash"].is_null());
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_login_wrong_password_and_unknown_email_alike() {
    let app = TestApp::with_database().await;
    app.create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "kit@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    // Neither response reveals whether the account exists.
    assert_eq!(wrong.body["message"], unknown.body["message"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::with_database().await;
    app.create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;

    app.login("KIT@Example.COM", "password123").await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_register_then_login() {
    let app = TestApp::with_database().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "new@example.com",
                "password": "password123",
                "display_name": "New User",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["roles"], serde_json::json!(["Member"]));

    app.login("new@example.com", "password123").await;

    // The same email cannot register twice, regardless of case.
    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "NEW@example.com",
                "password": "password123",
                "display_name": "Imposter",
            })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_refresh_rotates_and_rejects_replay() {
    let app = TestApp::with_database().await;
    app.create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;
    let tokens = app.login("kit@example.com", "password123").await;
    let first = tokens["refresh_token"].as_str().unwrap().to_string();

    let rotated = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": first })),
            None,
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let second = rotated.body["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first, second);

    // Replaying the redeemed token fails; its successor still works.
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": first })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    let successor = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": second })),
            None,
        )
        .await;
    assert_eq!(successor.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_logout_revokes_the_refresh_token() {
    let app = TestApp::with_database().await;
    app.create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;
    let tokens = app.login("kit@example.com", "password123").await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);

    // Logout is quiet about unknown or already-revoked tokens.
    let again = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_disabled_account_cannot_login() {
    let app = TestApp::with_database().await;
    let user_id = app
        .create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;
    let admin_token = app.mint_access_token("admin@example.com", vec![UserRole::Admin]);

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{user_id}/status"),
            Some(serde_json::json!({ "disabled": true })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["disabled"], true);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "kit@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}
