//! End-to-end tests of the HTTP API over an in-memory database.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::mocks::FailingMailer;
use common::{create_test_app, create_test_app_with_mailer, NOTIFY_ADDRESS};
use folio::auth::password::verify_password;
use folio::mail::templates::{CONTACT_SUBJECT, WELCOME_SUBJECT};
use folio::types::Role;
use rstest::rstest;
use serde_json::{json, Value};
use std::sync::Arc;

// ============= Health & docs =============

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = create_test_app().await;

    let response = app.server.get("/api/openapi.json").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["paths"]["/api/login"].is_object());
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let (app, _) = create_test_app().await;

    let response = app.server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

// ============= Public content =============

#[rstest]
#[case("/api/home")]
#[case("/api/about")]
#[case("/api/projects")]
#[tokio::test]
async fn test_public_lists_start_empty(#[case] path: &str) {
    let (app, _) = create_test_app().await;

    let response = app.server.get(path).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_home_crud() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    let created = app
        .server
        .post("/api/admin/home")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"title": "Hello", "description": "I build things"}))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_i64().unwrap();
    assert!(id > 0);

    let listed: Value = app.server.get("/api/home").await.json();
    assert_eq!(listed[0]["title"], "Hello");
    assert_eq!(listed[0]["id"], id);

    let updated = app
        .server
        .put("/api/admin/home")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"id": id, "title": "Hi", "description": "Still building"}))
        .await;
    updated.assert_status_ok();
    assert_eq!(
        updated.json::<Value>()["message"],
        format!("Home ID {} updated successfully", id)
    );

    let listed: Value = app.server.get("/api/home").await.json();
    assert_eq!(listed[0]["title"], "Hi");

    let deleted = app
        .server
        .delete(&format!("/api/admin/home/{}", id))
        .add_header("Authorization", bearer)
        .await;
    deleted.assert_status_ok();

    let listed: Value = app.server.get("/api/home").await.json();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_about_crud() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    let created = app
        .server
        .post("/api/admin/about")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"content": "Rust developer"}))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    app.server
        .put("/api/admin/about")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"id": id, "content": "Rust and Go developer"}))
        .await
        .assert_status_ok();

    let listed: Value = app.server.get("/api/about").await.json();
    assert_eq!(listed[0]["content"], "Rust and Go developer");

    app.server
        .delete(&format!("/api/admin/about/{}", id))
        .add_header("Authorization", bearer)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_projects_newest_first_with_optional_fields() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    for name in ["first", "second"] {
        app.server
            .post("/api/admin/projects")
            .add_header("Authorization", bearer.clone())
            .json(&json!({"name": name, "description": "d", "message": "m"}))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let listed: Value = app.server.get("/api/projects").await.json();
    assert_eq!(listed[0]["name"], "second");
    assert_eq!(listed[1]["name"], "first");
    assert_eq!(listed[0]["github_url"], "");
    assert_eq!(listed[0]["image_url"], "");
}

#[tokio::test]
async fn test_project_update_and_delete_by_path_id() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    let id = app
        .server
        .post("/api/admin/projects")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"name": "folio", "technologies": "rust"}))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    app.server
        .put(&format!("/api/admin/projects/{}", id))
        .add_header("Authorization", bearer.clone())
        .json(&json!({
            "name": "folio",
            "technologies": "rust, axum",
            "github_url": "https://github.com/example/folio"
        }))
        .await
        .assert_status_ok();

    let listed: Value = app.server.get("/api/admin/projects").add_header("Authorization", bearer.clone()).await.json();
    assert_eq!(listed[0]["technologies"], "rust, axum");
    assert_eq!(listed[0]["github_url"], "https://github.com/example/folio");

    app.server
        .delete(&format!("/api/admin/projects/{}", id))
        .add_header("Authorization", bearer)
        .await
        .assert_status_ok();
}

// ============= Validation =============

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    let response = app
        .server
        .post("/api/admin/home")
        .add_header("Authorization", bearer)
        .content_type("application/json")
        .text("{not json")
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_missing_and_empty_required_fields_are_400() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    app.server
        .post("/api/admin/about")
        .add_header("Authorization", bearer.clone())
        .json(&json!({}))
        .await
        .assert_status_bad_request();

    app.server
        .post("/api/admin/home")
        .add_header("Authorization", bearer)
        .json(&json!({"title": "  "}))
        .await
        .assert_status_bad_request();
}

#[rstest]
#[case("/api/admin/home/abc")]
#[case("/api/admin/home/0")]
#[case("/api/admin/home/-4")]
#[case("/api/admin/contact/1.5")]
#[tokio::test]
async fn test_bad_path_id_is_400(#[case] path: &str) {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    let response = app.server.delete(path).add_header("Authorization", bearer).await;

    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_missing_rows_are_404() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    app.server
        .put("/api/admin/home")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"id": 999, "title": "ghost"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .delete("/api/admin/about/999")
        .add_header("Authorization", bearer.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .put("/api/admin/projects/999")
        .add_header("Authorization", bearer)
        .json(&json!({"name": "ghost"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ============= Contact =============

#[tokio::test]
async fn test_contact_submission_notifies_owner() {
    let (app, mailer) = create_test_app().await;

    let response = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100",
            "message": "Let's talk"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec![NOTIFY_ADDRESS]);
    assert_eq!(sent[0].subject, CONTACT_SUBJECT);
    assert!(sent[0].html.contains("Let&#x27;s talk") || sent[0].html.contains("Let's talk"));

    let stored = app.db.list_contacts().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "ada@example.com");
}

#[tokio::test]
async fn test_contact_submission_survives_mail_failure() {
    let app = create_test_app_with_mailer(Arc::new(FailingMailer)).await;

    let response = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Mail is down"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_i64().unwrap();

    let stored = app.db.list_contacts().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].phone, "");
}

#[tokio::test]
async fn test_contact_admin_update_and_delete() {
    let (app, _) = create_test_app().await;
    let bearer = app.admin_bearer().await;

    let id = app
        .server
        .post("/api/contact")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "hi"}))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    app.server
        .put("/api/admin/contact")
        .add_header("Authorization", bearer.clone())
        .json(&json!({"id": id, "name": "Ada L.", "email": "ada@example.com", "message": "hi"}))
        .await
        .assert_status_ok();

    let listed: Value = app
        .server
        .get("/api/admin/contact")
        .add_header("Authorization", bearer.clone())
        .await
        .json();
    assert_eq!(listed[0]["name"], "Ada L.");

    app.server
        .delete(&format!("/api/admin/contact/{}", id))
        .add_header("Authorization", bearer)
        .await
        .assert_status_ok();
}

// ============= Authentication =============

#[tokio::test]
async fn test_admin_route_without_header_is_401() {
    let (app, _) = create_test_app().await;

    let response = app.server.get("/api/admin/contact").await;

    response.assert_status_unauthorized();
    assert!(response.json::<Value>()["error"].is_string());
}

#[rstest]
#[case("Basic dXNlcjpwYXNz")]
#[case("Bearer")]
#[case("Bearer ")]
#[case("bearer abc.def.ghi")]
#[case("Bearer invalid.token.here")]
#[tokio::test]
async fn test_bad_authorization_header_is_401(#[case] header: &str) {
    let (app, _) = create_test_app().await;

    app.server
        .get("/api/admin/home")
        .add_header("Authorization", header.to_string())
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let (app, _) = create_test_app().await;
    let id = app.create_account("late", "password", Role::Admin).await;
    let token = app
        .auth
        .issue_token_at(id, "late", Role::Admin, Utc::now() - Duration::hours(25))
        .unwrap();

    app.server
        .get("/api/admin/home")
        .add_header("Authorization", format!("Bearer {}", token))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_401() {
    let (app, _) = create_test_app().await;
    let other = folio::AuthService::new("a-completely-different-secret-value!".to_string(), 24);
    let token = other.issue_token(1, "mallory", Role::SuperAdmin).unwrap();

    app.server
        .get("/api/superadmin/users")
        .add_header("Authorization", format!("Bearer {}", token))
        .await
        .assert_status_unauthorized();
}

#[derive(Debug, Clone, Copy)]
enum Caller {
    Anonymous,
    Admin,
    SuperAdmin,
}

#[rstest]
#[case("/api/home", Caller::Anonymous, StatusCode::OK)]
#[case("/api/admin/home", Caller::Anonymous, StatusCode::UNAUTHORIZED)]
#[case("/api/admin/home", Caller::Admin, StatusCode::OK)]
#[case("/api/admin/home", Caller::SuperAdmin, StatusCode::OK)]
#[case("/api/superadmin/users", Caller::Anonymous, StatusCode::UNAUTHORIZED)]
#[case("/api/superadmin/users", Caller::Admin, StatusCode::FORBIDDEN)]
#[case("/api/superadmin/users", Caller::SuperAdmin, StatusCode::OK)]
#[tokio::test]
async fn test_trust_tiers(#[case] path: &str, #[case] caller: Caller, #[case] expected: StatusCode) {
    let (app, _) = create_test_app().await;

    let request = app.server.get(path);
    let request = match caller {
        Caller::Anonymous => request,
        Caller::Admin => request.add_header("Authorization", app.admin_bearer().await),
        Caller::SuperAdmin => request.add_header("Authorization", app.super_admin_bearer().await),
    };

    request.await.assert_status(expected);
}

// ============= Accounts & login =============

#[tokio::test]
async fn test_create_account_then_login() {
    let (app, mailer) = create_test_app().await;
    let bearer = app.super_admin_bearer().await;

    let created = app
        .server
        .post("/api/superadmin/users")
        .add_header("Authorization", bearer)
        .json(&json!({"username": "alice", "password": "secret", "email": "a@x.com"}))
        .await;
    created.assert_status(StatusCode::CREATED);

    let record = app
        .db
        .get_account_by_username("alice")
        .await
        .unwrap()
        .expect("alice stored");
    assert_ne!(record.password_hash, "secret");
    assert!(verify_password("secret", &record.password_hash).unwrap());
    assert_eq!(record.role, Role::Admin);

    let welcome = mailer.sent();
    assert_eq!(welcome.len(), 1);
    assert_eq!(welcome[0].to, vec!["a@x.com"]);
    assert_eq!(welcome[0].subject, WELCOME_SUBJECT);

    let login = app
        .server
        .post("/api/login")
        .json(&json!({"username": "alice", "password": "secret"}))
        .await;
    login.assert_status_ok();

    let body: Value = login.json();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    // the issued token opens the admin tier
    app.server
        .get("/api/admin/contact")
        .add_header("Authorization", format!("Bearer {}", body["token"].as_str().unwrap()))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_duplicate_username_is_400() {
    let (app, _) = create_test_app().await;
    let bearer = app.super_admin_bearer().await;
    let payload = json!({"username": "alice", "password": "secret", "email": "a@x.com"});

    app.server
        .post("/api/superadmin/users")
        .add_header("Authorization", bearer.clone())
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    app.server
        .post("/api/superadmin/users")
        .add_header("Authorization", bearer)
        .json(&payload)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_are_201_and_400() {
    let (app, _) = create_test_app().await;
    let bearer = app.super_admin_bearer().await;

    for round in 0..5 {
        let payload = json!({
            "username": format!("dup{}", round),
            "password": "secret",
            "email": "d@x.com"
        });
        let create = || {
            app.server
                .post("/api/superadmin/users")
                .add_header("Authorization", bearer.clone())
                .json(&payload)
        };

        let (first, second) = tokio::join!(create(), create());
        let mut statuses = [first.status_code(), second.status_code()];
        statuses.sort();

        assert_eq!(
            statuses,
            [StatusCode::CREATED, StatusCode::BAD_REQUEST],
            "round {}",
            round
        );
    }
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let (app, _) = create_test_app().await;
    app.create_account("alice", "secret", Role::Admin).await;

    let wrong_password = app
        .server
        .post("/api/login")
        .json(&json!({"username": "alice", "password": "nope"}))
        .await;
    wrong_password.assert_status_unauthorized();

    let unknown_user = app
        .server
        .post("/api/login")
        .json(&json!({"username": "bob", "password": "secret"}))
        .await;
    unknown_user.assert_status_unauthorized();

    assert_eq!(
        wrong_password.json::<Value>()["error"],
        "Invalid username or password"
    );
    assert_eq!(
        wrong_password.json::<Value>(),
        unknown_user.json::<Value>()
    );
}

#[tokio::test]
async fn test_login_with_malformed_body_is_400() {
    let (app, _) = create_test_app().await;

    app.server
        .post("/api/login")
        .json(&json!({"username": "alice"}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_update_account_password_and_role() {
    let (app, _) = create_test_app().await;
    let bearer = app.super_admin_bearer().await;
    let id = app.create_account("alice", "secret", Role::Admin).await;

    app.server
        .put("/api/superadmin/users")
        .add_header("Authorization", bearer.clone())
        .json(&json!({
            "id": id,
            "username": "alice",
            "email": "alice@new.example",
            "password": "n3w-secret",
            "role": "super_admin"
        }))
        .await
        .assert_status_ok();

    let login: Value = app
        .server
        .post("/api/login")
        .json(&json!({"username": "alice", "password": "n3w-secret"}))
        .await
        .json();
    assert_eq!(login["user"]["role"], "super_admin");
    assert_eq!(login["user"]["email"], "alice@new.example");

    // without a password the stored hash is kept
    app.server
        .put("/api/superadmin/users")
        .add_header("Authorization", bearer)
        .json(&json!({"id": id, "username": "alice2", "email": "alice@new.example"}))
        .await
        .assert_status_ok();

    app.server
        .post("/api/login")
        .json(&json!({"username": "alice2", "password": "n3w-secret"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_account_to_taken_username_is_400() {
    let (app, _) = create_test_app().await;
    let bearer = app.super_admin_bearer().await;
    let id = app.create_account("alice", "secret", Role::Admin).await;
    app.create_account("bob", "secret", Role::Admin).await;

    app.server
        .put("/api/superadmin/users")
        .add_header("Authorization", bearer)
        .json(&json!({"id": id, "username": "bob", "email": "a@x.com"}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_list_and_delete_accounts() {
    let (app, _) = create_test_app().await;
    let bearer = app.super_admin_bearer().await;
    let id = app.create_account("alice", "secret", Role::Admin).await;

    let listed: Value = app
        .server
        .get("/api/superadmin/users")
        .add_header("Authorization", bearer.clone())
        .await
        .json();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["root", "alice"]);
    assert!(listed[0].get("password_hash").is_none());

    app.server
        .delete(&format!("/api/superadmin/users/{}", id))
        .add_header("Authorization", bearer.clone())
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/api/superadmin/users/{}", id))
        .add_header("Authorization", bearer)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
