use crate::{
    api::extract::{require_field, require_id, JsonBody, ResourceId},
    auth::{password::hash_password_blocking, CurrentUser},
    db::accounts::DUPLICATE_USERNAME,
    mail::{self, templates},
    types::{
        Account, AppError, CreateAccountRequest, CreatedResponse, MessageResponse, Result,
        UpdateAccountRequest,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

/// List accounts
#[utoipa::path(
    get,
    path = "/api/superadmin/users",
    responses(
        (status = 200, description = "Accounts", body = [Account]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Super admin required")
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Account>>> {
    Ok(Json(state.db.list_accounts().await?))
}

/// Create an account
///
/// The password is stored as an Argon2 hash. A welcome mail is sent to the
/// new address; failure to send it does not fail the request.
#[utoipa::path(
    post,
    path = "/api/superadmin/users",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid input or duplicate username"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Super admin required")
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    actor: CurrentUser,
    JsonBody(payload): JsonBody<CreateAccountRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    require_field("username", &payload.username)?;
    require_field("password", &payload.password)?;
    require_field("email", &payload.email)?;

    // fast path; the unique index still decides races
    if state
        .db
        .get_account_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::InvalidInput(DUPLICATE_USERNAME.to_string()));
    }

    let password_hash = hash_password_blocking(payload.password).await?;
    let id = state
        .db
        .create_account(&payload.username, &payload.email, &password_hash, payload.role)
        .await?;

    info!(id, username = %payload.username, by = %actor.username, "Account created");

    mail::deliver(
        state.mailer.as_ref(),
        templates::welcome(&payload.email, &payload.username),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "User created successfully".to_string(),
            id,
        }),
    ))
}

/// Update an account (id in body)
#[utoipa::path(
    put,
    path = "/api/superadmin/users",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input or duplicate username"),
        (status = 404, description = "No such account")
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UpdateAccountRequest>,
) -> Result<Json<MessageResponse>> {
    require_id(payload.id)?;
    require_field("username", &payload.username)?;
    require_field("email", &payload.email)?;
    if let Some(password) = &payload.password {
        require_field("password", password)?;
    }

    if let Some(existing) = state.db.get_account_by_username(&payload.username).await? {
        if existing.id != payload.id {
            return Err(AppError::InvalidInput(DUPLICATE_USERNAME.to_string()));
        }
    }

    let password_hash = match payload.password {
        Some(password) => Some(hash_password_blocking(password).await?),
        None => None,
    };

    let updated = state
        .db
        .update_account(
            payload.id,
            &payload.username,
            &payload.email,
            password_hash.as_deref(),
            payload.role,
        )
        .await?;

    if !updated {
        return Err(AppError::NotFound(format!("User ID {} not found", payload.id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "User ID {} updated successfully",
        payload.id
    ))))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/superadmin/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No such account")
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_account(id).await? {
        return Err(AppError::NotFound(format!("User ID {} not found", id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "User ID {} deleted successfully",
        id
    ))))
}
