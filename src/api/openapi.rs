use crate::api::handlers::{about, auth, contact, health, home, projects, users};
use crate::types::{
    About, Account, Contact, CreateAccountRequest, CreatedResponse, ErrorResponse,
    HealthResponse, Home, LoginRequest, LoginResponse, MessageResponse, Project, Role,
    UpdateAccountRequest,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Folio API", description = "Portfolio content and admin API"),
    paths(
        health::health_check,
        auth::login,
        home::list_home,
        home::create_home,
        home::update_home,
        home::delete_home,
        about::list_about,
        about::create_about,
        about::update_about,
        about::delete_about,
        projects::list_projects,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        contact::create_contact,
        contact::list_contacts,
        contact::update_contact,
        contact::delete_contact,
        users::list_users,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        Home,
        About,
        Project,
        Contact,
        Role,
        Account,
        CreateAccountRequest,
        UpdateAccountRequest,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        CreatedResponse,
        ErrorResponse,
        HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login"),
        (name = "home", description = "Home section"),
        (name = "about", description = "About section"),
        (name = "projects", description = "Projects"),
        (name = "contact", description = "Contact form"),
        (name = "users", description = "Account management, super admin only"),
        (name = "health", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
