use anyhow::Context;
use folio::{
    api::build_app,
    auth::{password::hash_password_blocking, AuthService},
    cli::{output::Output, Cli, Commands, UserCommands},
    db::{DatabaseProvider, PortfolioDb},
    mail,
    types::Role,
    utils::toml_config::{FolioConfig, LogFormat},
    AppState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = match FolioConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output.error(&format!("{}", e));
            output.hint("Settings are read from folio.toml; pass --config to use another file");
            std::process::exit(1);
        }
    };

    init_tracing(&config, cli.verbose);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Config { validate } => show_config(&config, validate, &output),
        Commands::User(UserCommands::Create {
            username,
            email,
            password,
            super_admin,
        }) => {
            let role = if super_admin {
                Role::SuperAdmin
            } else {
                Role::Admin
            };
            create_user(&config, &username, &email, password, role, &output).await
        }
        Commands::User(UserCommands::List) => list_users(&config, &output).await,
    }
}

fn init_tracing(config: &FolioConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Opens and migrates the database, then applies the configured super admin.
async fn open_database(config: &FolioConfig) -> anyhow::Result<PortfolioDb> {
    let provider = DatabaseProvider::from_config(&config.database, config.database_auth_token());
    let db = provider
        .open(config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.url))?;

    if let Some(username) = &config.auth.super_admin_username {
        if db.promote_super_admin(username).await? {
            info!(username = %username, "Super admin role applied");
        } else {
            warn!(username = %username, "Configured super admin account does not exist");
        }
    }

    Ok(db)
}

async fn serve(config: FolioConfig) -> anyhow::Result<()> {
    for warning in config.validate_with_warnings()? {
        warn!("{}", warning);
    }

    let db = open_database(&config).await?;
    info!(url = %config.database.url, "Database ready");

    let auth_service = Arc::new(AuthService::new(
        config.jwt_secret()?,
        config.auth.token_ttl_hours,
    ));
    let mailer = mail::from_config(&config)?;

    let addr = config.bind_address();
    let state = AppState {
        config: Arc::new(config),
        db: Arc::new(db),
        auth_service,
        mailer,
    };
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Folio listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

fn show_config(config: &FolioConfig, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.banner();

    if validate {
        match config.validate_with_warnings() {
            Ok(warnings) => {
                output.success("Configuration is valid");
                for warning in warnings {
                    output.warning(&warning.message);
                }
            }
            Err(e) => {
                output.error(&e.to_string());
                std::process::exit(1);
            }
        }
    }

    output.header("Server");
    output.kv("address", &config.bind_address());
    output.kv("log level", &config.server.log_level);
    output.kv(
        "static dir",
        &config
            .server
            .static_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string()),
    );

    output.header("Auth");
    output.kv("secret env", &config.auth.jwt_secret_env);
    output.kv("token ttl", &format!("{}h", config.auth.token_ttl_hours));

    output.header("Database");
    output.kv("url", &config.database.url);
    output.kv("max connections", &config.database.max_connections.to_string());

    output.header("Mail");
    output.kv(
        "status",
        if config.mail_api_key().is_some() {
            "enabled"
        } else {
            "disabled"
        },
    );
    output.kv("from", &config.mail.from);
    output.kv("notify", &config.mail.notify);

    Ok(())
}

async fn create_user(
    config: &FolioConfig,
    username: &str,
    email: &str,
    password: String,
    role: Role,
    output: &Output,
) -> anyhow::Result<()> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        output.error("username, email and password must not be empty");
        std::process::exit(1);
    }

    let db = open_database(config).await?;

    if db.get_account_by_username(username).await?.is_some() {
        output.error(&format!("User '{}' already exists", username));
        std::process::exit(1);
    }

    let password_hash = hash_password_blocking(password).await?;
    let id = db
        .create_account(username, email, &password_hash, role)
        .await?;

    output.success(&format!(
        "Created {} '{}' with id {}",
        role.as_str(),
        username,
        id
    ));
    Ok(())
}

async fn list_users(config: &FolioConfig, output: &Output) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let accounts = db.list_accounts().await?;

    if accounts.is_empty() {
        output.info("No accounts yet");
        output.hint("Create one with: folio-server user create --username <name> --email <email>");
        return Ok(());
    }

    output.table_header(&["id", "username", "email", "role"]);
    for account in &accounts {
        output.table_row(&[
            &account.id.to_string(),
            &account.username,
            &account.email,
            account.role.as_str(),
        ]);
    }

    Ok(())
}
