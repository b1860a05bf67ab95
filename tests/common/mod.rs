//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mocks;

use axum_test::TestServer;
use folio::{
    auth::{password::hash_password, AuthService},
    build_app,
    mail::Mailer,
    types::Role,
    AppState, FolioConfig, PortfolioDb,
};
use mocks::RecordingMailer;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret-of-at-least-32-bytes";
pub const NOTIFY_ADDRESS: &str = "owner@example.com";

pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<PortfolioDb>,
    pub auth: Arc<AuthService>,
}

impl TestApp {
    /// Inserts an account directly and returns its id.
    pub async fn create_account(&self, username: &str, password: &str, role: Role) -> i64 {
        let hash = hash_password(password).expect("hash");
        self.db
            .create_account(username, &format!("{}@example.com", username), &hash, role)
            .await
            .expect("create account")
    }

    /// Creates an account and returns a bearer header value for it.
    pub async fn bearer_for(&self, username: &str, role: Role) -> String {
        let id = self.create_account(username, "password", role).await;
        let token = self.auth.issue_token(id, username, role).expect("token");
        format!("Bearer {}", token)
    }

    pub async fn admin_bearer(&self) -> String {
        self.bearer_for("editor", Role::Admin).await
    }

    pub async fn super_admin_bearer(&self) -> String {
        self.bearer_for("root", Role::SuperAdmin).await
    }
}

pub fn test_config() -> FolioConfig {
    let mut config = FolioConfig::default();
    config.database.url = ":memory:".to_string();
    config.mail.notify = NOTIFY_ADDRESS.to_string();
    config
}

pub async fn create_test_app_with_mailer(mailer: Arc<dyn Mailer>) -> TestApp {
    let db = Arc::new(
        PortfolioDb::new_memory()
            .await
            .expect("Failed to create in-memory database"),
    );
    let auth = Arc::new(AuthService::new(TEST_SECRET.to_string(), 24));

    let state = AppState {
        config: Arc::new(test_config()),
        db: db.clone(),
        auth_service: auth.clone(),
        mailer,
    };

    let server = TestServer::new(build_app(state)).expect("Failed to create test server");

    TestApp { server, db, auth }
}

pub async fn create_test_app() -> (TestApp, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let app = create_test_app_with_mailer(mailer.clone()).await;
    (app, mailer)
}
