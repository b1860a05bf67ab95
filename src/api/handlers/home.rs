use crate::{
    api::extract::{require_field, require_id, JsonBody, ResourceId},
    types::{AppError, CreatedResponse, Home, MessageResponse, Result},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// List home entries
#[utoipa::path(
    get,
    path = "/api/home",
    responses((status = 200, description = "Home entries", body = [Home])),
    tag = "home"
)]
pub async fn list_home(State(state): State<AppState>) -> Result<Json<Vec<Home>>> {
    Ok(Json(state.db.list_home().await?))
}

/// Create a home entry
#[utoipa::path(
    post,
    path = "/api/admin/home",
    request_body = Home,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = [])),
    tag = "home"
)]
pub async fn create_home(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Home>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    require_field("title", &payload.title)?;

    let id = state.db.create_home(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Home created successfully".to_string(),
            id,
        }),
    ))
}

/// Update a home entry (id in body)
#[utoipa::path(
    put,
    path = "/api/admin/home",
    request_body = Home,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No such entry")
    ),
    security(("bearer" = [])),
    tag = "home"
)]
pub async fn update_home(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Home>,
) -> Result<Json<MessageResponse>> {
    require_id(payload.id)?;
    require_field("title", &payload.title)?;

    if !state.db.update_home(&payload).await? {
        return Err(AppError::NotFound(format!("Home ID {} not found", payload.id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "Home ID {} updated successfully",
        payload.id
    ))))
}

/// Delete a home entry
#[utoipa::path(
    delete,
    path = "/api/admin/home/{id}",
    params(("id" = i64, Path, description = "Home entry id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No such entry")
    ),
    security(("bearer" = [])),
    tag = "home"
)]
pub async fn delete_home(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_home(id).await? {
        return Err(AppError::NotFound(format!("Home ID {} not found", id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "Home ID {} deleted successfully",
        id
    ))))
}
