use crate::{
    api::extract::{require_field, require_id, JsonBody, ResourceId},
    mail::{self, templates},
    types::{AppError, Contact, CreatedResponse, MessageResponse, Result},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

fn validate(contact: &Contact) -> Result<()> {
    require_field("name", &contact.name)?;
    require_field("email", &contact.email)?;
    require_field("message", &contact.message)
}

/// Submit the contact form
///
/// The row is stored first; the owner notification is best effort and a
/// failed send does not change the response.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = Contact,
    responses(
        (status = 201, description = "Stored", body = CreatedResponse),
        (status = 400, description = "Invalid input")
    ),
    tag = "contact"
)]
pub async fn create_contact(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Contact>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    validate(&payload)?;

    let id = state.db.create_contact(&payload).await?;
    info!(id, "Contact message stored");

    let notification = templates::contact_notification(&state.config.mail.notify, &payload);
    mail::deliver(state.mailer.as_ref(), notification).await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Contact created successfully".to_string(),
            id,
        }),
    ))
}

/// List contact messages
#[utoipa::path(
    get,
    path = "/api/admin/contact",
    responses(
        (status = 200, description = "Contact messages", body = [Contact]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = [])),
    tag = "contact"
)]
pub async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    Ok(Json(state.db.list_contacts().await?))
}

/// Update a contact message (id in body)
#[utoipa::path(
    put,
    path = "/api/admin/contact",
    request_body = Contact,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No such message")
    ),
    security(("bearer" = [])),
    tag = "contact"
)]
pub async fn update_contact(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Contact>,
) -> Result<Json<MessageResponse>> {
    require_id(payload.id)?;
    validate(&payload)?;

    if !state.db.update_contact(&payload).await? {
        return Err(AppError::NotFound(format!("Contact ID {} not found", payload.id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "Contact ID {} updated successfully",
        payload.id
    ))))
}

/// Delete a contact message
#[utoipa::path(
    delete,
    path = "/api/admin/contact/{id}",
    params(("id" = i64, Path, description = "Contact message id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No such message")
    ),
    security(("bearer" = [])),
    tag = "contact"
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>> {
    if !state.db.delete_contact(id).await? {
        return Err(AppError::NotFound(format!("Contact ID {} not found", id)));
    }

    Ok(Json(MessageResponse::new(format!(
        "Contact ID {} deleted successfully",
        id
    ))))
}
