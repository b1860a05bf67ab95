use crate::auth::jwt::AuthService;
use crate::types::{AppError, Claims, Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Identity attached to a request once its bearer token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Pulls the token out of an `Authorization` header value.
///
/// Only the exact `Bearer ` prefix is accepted and the remainder must be non-empty.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Rejects the request with 401 unless it carries a valid bearer token.
/// On success the [`CurrentUser`] is inserted into the request extensions.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Auth("Authorization header required".to_string()))?
        .to_str()
        .map_err(|_| AppError::Auth("Authorization header is not valid text".to_string()))?;

    let token = bearer_token(auth_header).ok_or_else(|| {
        AppError::Auth("Authorization header must be 'Bearer <token>'".to_string())
    })?;

    let claims = auth_service.validate_token(token).map_err(|e| {
        debug!(path = %req.uri().path(), "Rejected bearer token: {}", e);
        AppError::from(e)
    })?;

    req.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(req).await)
}

/// Lets the request through only for super admins. Must run after
/// [`auth_middleware`].
pub async fn require_super_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::Auth("Authentication required".to_string()))?;

    if user.role != Role::SuperAdmin {
        debug!(username = %user.username, "Super admin route denied");
        return Err(AppError::Forbidden(
            "Super admin privileges required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::Auth("Authentication required".to_string()))
    }
}
