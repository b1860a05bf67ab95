//! TOML-based configuration for Folio
//!
//! Infrastructure settings (listen address, signing secret, database, mail
//! relay) are read once at startup from `folio.toml`. Secrets never live in
//! the file itself: the file names the environment variables that hold them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub mail: MailConfig,
}

// ============= Server Configuration =============

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Built single-page frontend served for every non-API path
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            static_dir: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Account promoted to `super_admin` when the schema is migrated
    #[serde(default)]
    pub super_admin_username: Option<String>,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

/// Upper bound on `auth.token_ttl_hours`: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

fn default_token_ttl_hours() -> i64 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            token_ttl_hours: default_token_ttl_hours(),
            super_admin_username: None,
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// File path, `:memory:`, or a `libsql://` URL
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Environment variable for the Turso auth token
    #[serde(default)]
    pub auth_token_env: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_database_url() -> String {
    "./data/folio.db".to_string()
}

fn default_max_connections() -> usize {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            auth_token_env: None,
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_remote(&self) -> bool {
        let url = self.url.trim();
        url.starts_with("libsql://") || url.starts_with("https://")
    }
}

// ============= Mail Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Environment variable name containing the Resend API key.
    /// Mail is disabled when it is unset.
    #[serde(default = "default_mail_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_mail_from")]
    pub from: String,

    /// Recipient of contact form notifications
    #[serde(default)]
    pub notify: String,

    #[serde(default = "default_mail_api_base")]
    pub api_base: String,

    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_mail_api_key_env() -> String {
    "RESEND_API_KEY".to_string()
}

fn default_mail_from() -> String {
    "onboarding@resend.dev".to_string()
}

fn default_mail_api_base() -> String {
    "https://api.resend.com".to_string()
}

fn default_mail_timeout_secs() -> u64 {
    10
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_mail_api_key_env(),
            from: default_mail_from(),
            notify: String::new(),
            api_base: default_mail_api_base(),
            timeout_secs: default_mail_timeout_secs(),
        }
    }
}

// ============= Loading and validation =============

/// Non-fatal configuration issue reported at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

/// Minimum signing secret length before a warning is emitted.
const MIN_SECRET_LEN: usize = 32;

impl FolioConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse without validating.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration, including referenced environment variables
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.jwt_secret()?;
        if secret.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} must not be empty",
                self.auth.jwt_secret_env
            )));
        }

        if self.auth.token_ttl_hours <= 0 || self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_hours must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be positive".to_string(),
            ));
        }

        if self.database.is_remote() && !cfg!(feature = "turso") {
            return Err(ConfigError::ValidationError(format!(
                "database.url '{}' is remote; rebuild with the 'turso' feature",
                self.database.url
            )));
        }

        if self.mail.notify.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "mail.notify must name the contact notification recipient".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate and collect non-fatal warnings
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.jwt_secret()?.len() < MIN_SECRET_LEN {
            warnings.push(ConfigWarning {
                message: format!(
                    "{} is shorter than {} bytes",
                    self.auth.jwt_secret_env, MIN_SECRET_LEN
                ),
            });
        }

        if self.mail_api_key().is_none() {
            warnings.push(ConfigWarning {
                message: format!(
                    "{} is not set; contact notifications are disabled",
                    self.mail.api_key_env
                ),
            });
        }

        if self.database.is_remote() && self.database_auth_token().is_none() {
            warnings.push(ConfigWarning {
                message: "remote database configured without an auth token".to_string(),
            });
        }

        Ok(warnings)
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.auth.jwt_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }

    /// Resend API key, if mail is configured
    pub fn mail_api_key(&self) -> Option<String> {
        self.resolve_env(&self.mail.api_key_env)
            .filter(|key| !key.trim().is_empty())
    }

    pub fn database_auth_token(&self) -> Option<String> {
        self.database
            .auth_token_env
            .as_deref()
            .and_then(|name| self.resolve_env(name))
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
