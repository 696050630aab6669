//! Integration tests for admin user management and the notify surface.

use axum::http::StatusCode;
use uuid::Uuid;

use reunite_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_admin_routes_require_a_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/admin/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/admin/notify",
            Some(serde_json::json!({
                "group": "Admins",
                "event": "RunnerChanged",
                "operation": "update",
                "runner": {"id": 12},
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_tokens_are_refused_everywhere() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("member@example.com", vec![UserRole::Member]);

    let list = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
    assert_eq!(list.body["error"], "FORBIDDEN");

    let id = Uuid::new_v4();
    let roles = app
        .request(
            "PUT",
            &format!("/api/admin/users/{id}/roles"),
            Some(serde_json::json!({ "roles": ["Manager"] })),
            Some(&token),
        )
        .await;
    assert_eq!(roles.status, StatusCode::FORBIDDEN);

    let notify = app
        .request(
            "POST",
            "/api/admin/notify",
            Some(serde_json::json!({
                "group": "Admins",
                "event": "RunnerChanged",
                "operation": "update",
                "runner": {"id": 12},
            })),
            Some(&token),
        )
        .await;
    assert_eq!(notify.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_and_status_updates_are_admin_only() {
    let app = TestApp::new().await;

    // Managers may list users and notify, but not mutate accounts.
    let manager = app.mint_access_token("desk@example.com", vec![UserRole::Manager]);
    let id = Uuid::new_v4();

    let roles = app
        .request(
            "PUT",
            &format!("/api/admin/users/{id}/roles"),
            Some(serde_json::json!({ "roles": ["Member"] })),
            Some(&manager),
        )
        .await;
    assert_eq!(roles.status, StatusCode::FORBIDDEN);

    let status = app
        .request(
            "PUT",
            &format!("/api/admin/users/{id}/status"),
            Some(serde_json::json!({ "disabled": true })),
            Some(&manager),
        )
        .await;
    assert_eq!(status.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_update_rejects_an_empty_set() {
    let app = TestApp::new().await;
    let admin = app.mint_access_token("admin@example.com", vec![UserRole::Admin]);
    let id = Uuid::new_v4();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{id}/roles"),
            Some(serde_json::json!({ "roles": [] })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_notify_reports_deliveries_to_an_empty_group() {
    let app = TestApp::new().await;
    let staff = app.mint_access_token("desk@example.com", vec![UserRole::Manager]);

    let response = app
        .request(
            "POST",
            "/api/admin/notify",
            Some(serde_json::json!({
                "group": "Admins",
                "event": "RunnerChanged",
                "operation": "update",
                "runner": {"id": 12, "status": "found"},
            })),
            Some(&staff),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["group"], "Admins");
    assert_eq!(response.body["data"]["attempted"], 0);
    assert_eq!(response.body["data"]["delivered"], 0);
    assert_eq!(response.body["data"]["failed"], serde_json::json!([]));
}

#[tokio::test]
async fn test_notify_rejects_unknown_groups() {
    let app = TestApp::new().await;
    let staff = app.mint_access_token("desk@example.com", vec![UserRole::Manager]);

    let response = app
        .request(
            "POST",
            "/api/admin/notify",
            Some(serde_json::json!({
                "group": "everybody",
                "event": "RunnerChanged",
                "operation": "update",
                "runner": {"id": 12},
            })),
            Some(&staff),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_list_users_paginates_newest_first() {
    let app = TestApp::with_database().await;
    for i in 0..3 {
        app.create_test_user(
            &format!("user{i}@example.com"),
            "password123",
            &[UserRole::Member],
        )
        .await;
    }
    let staff = app.mint_access_token("desk@example.com", vec![UserRole::Manager]);

    let page1 = app
        .request(
            "GET",
            "/api/admin/users?page=1&page_size=2",
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(page1.status, StatusCode::OK);
    assert_eq!(page1.body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(page1.body["data"]["total_items"], 3);
    assert_eq!(page1.body["data"]["total_pages"], 2);

    let page2 = app
        .request(
            "GET",
            "/api/admin/users?page=2&page_size=2",
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(page2.body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_admin_replaces_roles() {
    let app = TestApp::with_database().await;
    let user_id = app
        .create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;
    let admin = app.mint_access_token("admin@example.com", vec![UserRole::Admin]);

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{user_id}/roles"),
            Some(serde_json::json!({ "roles": ["Manager", "LawEnforcement"] })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["roles"],
        serde_json::json!(["Manager", "LawEnforcement"])
    );

    // The replacement shows up on the next login.
    let tokens = app.login("kit@example.com", "password123").await;
    assert_eq!(
        tokens["user"]["roles"],
        serde_json::json!(["Manager", "LawEnforcement"])
    );
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_role_update_for_unknown_user_is_not_found() {
    let app = TestApp::with_database().await;
    let admin = app.mint_access_token("admin@example.com", vec![UserRole::Admin]);
    let id = Uuid::new_v4();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{id}/roles"),
            Some(serde_json::json!({ "roles": ["Member"] })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL; set REUNITE_TEST_DATABASE_URL"]
async fn test_disabling_an_account_revokes_its_refresh_tokens() {
    let app = TestApp::with_database().await;
    let user_id = app
        .create_test_user("kit@example.com", "password123", &[UserRole::Member])
        .await;
    let tokens = app.login("kit@example.com", "password123").await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let admin = app.mint_access_token("admin@example.com", vec![UserRole::Admin]);
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{user_id}/status"),
            Some(serde_json::json!({ "disabled": true })),
            Some(&admin),
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

    // Re-enabling does not resurrect revoked tokens.
    app.request(
        "PUT",
        &format!("/api/admin/users/{user_id}/status"),
        Some(serde_json::json!({ "disabled": false })),
        Some(&admin),
    )
    .await;
    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}
