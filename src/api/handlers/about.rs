use crate::{
    api::extract::{require_field, require_id, JsonBody, ResourceId},
    types::{About, AppError, CreatedResponse, MessageResponse, Result},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// List about entries
#[utoipa::path(
    get,
    path = "/api/about",
    responses((status = 200, description = "About entries", body = [About])),
    tag = "about"
)]
pub async fn list_about(State(state): State<AppState>) -> Result<Json<Vec<About>>> {
    Ok(Json(state.db.list_about().await?))
}

/// Create an about entry
#[utoipa::path(
    post,
    path = "/api/admin/about",
    request_body = About,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = [])),
    tag = "about"
)]
pub async fn create_about(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<About>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    require_field("content", &payload.content)?;

    let id = state.db.create_about(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "About created successfully".to_string(),
            id,
        }),
    ))
}

/// Update an about entry (id in body)
#[utoipa::path(
    put,
    path = "/api/admin/about",
    request_body = About,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No such entry")
    ),
    security(("bearer" = [])),
    tag = "about"
)]
pub async fn update_about(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<About>,
) -> Result<Json<MessageResponse>> {
    require_id(payload.id)?;
    require_field("content", &payload.content)?;

    if !state.db.update_about(&payload).await? {
        return Err(AppError::NotFound(format!("About ID {} not found", payload.id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "About ID {} updated successfully",
        payload.id
    ))))
}

/// Delete an about entry
#[utoipa::path(
    delete,
    path = "/api/admin/about/{id}",
    params(("id" = i64, Path, description = "About entry id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No such entry")
    ),
    security(("bearer" = [])),
    tag = "about"
)]
pub async fn delete_about(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_about(id).await? {
        return Err(AppError::NotFound(format!("About ID {} not found", id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "About ID {} deleted successfully",
        id
    ))))
}
