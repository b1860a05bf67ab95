use crate::api::handlers::{about, auth, contact, health, home, projects, users};
use crate::api::openapi::ApiDoc;
use crate::auth::jwt::AuthService;
use crate::auth::middleware::{auth_middleware, require_super_admin};
use crate::types::AppError;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Routes under `/api`, grouped by trust tier.
pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/home", get(home::list_home))
        .route("/about", get(about::list_about))
        .route("/projects", get(projects::list_projects))
        .route("/contact", post(contact::create_contact))
        .route("/login", post(auth::login))
        .route("/openapi.json", get(openapi_json));

    let admin_routes = Router::new()
        .route(
            "/contact",
            get(contact::list_contacts).put(contact::update_contact),
        )
        .route("/contact/{id}", delete(contact::delete_contact))
        .route(
            "/home",
            get(home::list_home)
                .post(home::create_home)
                .put(home::update_home),
        )
        .route("/home/{id}", delete(home::delete_home))
        .route(
            "/about",
            get(about::list_about)
                .post(about::create_about)
                .put(about::update_about),
        )
        .route("/about/{id}", delete(about::delete_about))
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            put(projects::update_project).delete(projects::delete_project),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_service.clone(),
            auth_middleware,
        ));

    // auth runs first, then the role gate
    let superadmin_routes = Router::new()
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route("/users/{id}", delete(users::delete_user))
        .route_layer(middleware::from_fn(require_super_admin))
        .route_layer(middleware::from_fn_with_state(auth_service, auth_middleware));

    public_routes
        .nest("/admin", admin_routes)
        .nest("/superadmin", superadmin_routes)
        .fallback(api_not_found)
}

/// The complete application: API, health check, CORS, tracing and the
/// optional single-page frontend.
pub fn build_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_router(state.auth_service.clone()));

    #[cfg(feature = "swagger-ui")]
    {
        app = app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    if let Some(dir) = &state.config.server.static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)));
    }

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config.server.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    layer
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn api_not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}
