use crate::{
    api::extract::{require_field, JsonBody},
    auth::password::{verify_password_blocking, DUMMY_PASSWORD_HASH},
    types::{AppError, LoginRequest, LoginResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use tracing::{debug, info};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    require_field("username", &payload.username)?;
    require_field("password", &payload.password)?;

    let record = state.db.get_account_by_username(&payload.username).await?;

    // unknown users still pay for a hash check
    let stored_hash = record
        .as_ref()
        .map_or(DUMMY_PASSWORD_HASH, |r| r.password_hash.as_str())
        .to_string();
    let verified = verify_password_blocking(payload.password, stored_hash).await?;

    let Some(record) = record else {
        debug!(username = %payload.username, "Login for unknown user");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    };

    if !verified {
        debug!(username = %record.username, "Login with wrong password");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let token = state
        .auth_service
        .issue_token(record.id, &record.username, record.role)?;

    info!(user_id = record.id, username = %record.username, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: record.into_account(),
    }))
}
