use crate::db::PortfolioDb;
use crate::types::Result;
use crate::utils::toml_config::DatabaseConfig;

/// Where the relational store lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Chooses a provider from the `[database]` section.
    ///
    /// `libsql://` and `https://` URLs are remote and need `auth_token`.
    pub fn from_config(config: &DatabaseConfig, auth_token: Option<String>) -> Self {
        let url = config.url.trim();

        if url.is_empty() || url == ":memory:" {
            return DatabaseProvider::Memory;
        }

        #[cfg(feature = "turso")]
        {
            if url.starts_with("libsql://") || url.starts_with("https://") {
                return DatabaseProvider::Turso {
                    url: url.to_string(),
                    auth_token: auth_token.unwrap_or_default(),
                };
            }
        }
        #[cfg(not(feature = "turso"))]
        let _ = auth_token;

        DatabaseProvider::SQLite {
            path: url.to_string(),
        }
    }

    /// Opens, pings and migrates the database.
    pub async fn open(&self, max_connections: usize) -> Result<PortfolioDb> {
        match self {
            DatabaseProvider::Memory => PortfolioDb::new_memory().await,
            DatabaseProvider::SQLite { path } => PortfolioDb::new_local(path, max_connections).await,
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                PortfolioDb::new_remote(url.clone(), auth_token.clone(), max_connections).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_memory_urls() {
        assert_eq!(
            DatabaseProvider::from_config(&config(":memory:"), None),
            DatabaseProvider::Memory
        );
        assert_eq!(
            DatabaseProvider::from_config(&config(""), None),
            DatabaseProvider::Memory
        );
    }

    #[test]
    fn test_file_path() {
        assert_eq!(
            DatabaseProvider::from_config(&config("./data/folio.db"), None),
            DatabaseProvider::SQLite {
                path: "./data/folio.db".to_string()
            }
        );
    }

    #[cfg(feature = "turso")]
    #[test]
    fn test_remote_url() {
        assert_eq!(
            DatabaseProvider::from_config(&config("libsql://folio.turso.io"), Some("tok".into())),
            DatabaseProvider::Turso {
                url: "libsql://folio.turso.io".to_string(),
                auth_token: "tok".to_string(),
            }
        );
    }
}
