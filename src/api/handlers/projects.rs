use crate::{
    api::extract::{require_field, JsonBody, ResourceId},
    types::{AppError, CreatedResponse, MessageResponse, Project, Result},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// List projects, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    responses((status = 200, description = "Projects", body = [Project])),
    tag = "projects"
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    Ok(Json(state.db.list_projects().await?))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/admin/projects",
    request_body = Project,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Project>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    require_field("name", &payload.name)?;

    let id = state.db.create_project(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Project created successfully".to_string(),
            id,
        }),
    ))
}

/// Replace a project
#[utoipa::path(
    put,
    path = "/api/admin/projects/{id}",
    params(("id" = i64, Path, description = "Project id")),
    request_body = Project,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No such project")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    JsonBody(payload): JsonBody<Project>,
) -> Result<Json<MessageResponse>> {
    require_field("name", &payload.name)?;

    if !state.db.update_project(id, &payload).await? {
        return Err(AppError::NotFound(format!("Project ID {} not found", id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "Project ID {} updated successfully",
        id
    ))))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/admin/projects/{id}",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No such project")
    ),
    security(("bearer" = [])),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_project(id).await? {
        return Err(AppError::NotFound(format!("Project ID {} not found", id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "Project ID {} deleted successfully",
        id
    ))))
}
