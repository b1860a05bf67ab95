//! CLI for the folio-server binary
//!
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio - portfolio backend
#[derive(Parser, Debug)]
#[command(
    name = "folio-server",
    version,
    about = "Folio - portfolio content API with an authenticated admin panel",
    long_about = "Serves portfolio content over a JSON API, stores contact form\n\
                  submissions and mails the owner, and gates editing behind JWT auth.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  folio-server                          # Start the server (reads folio.toml)\n    \
                  folio-server --config prod.toml       # Use a custom config file\n    \
                  folio-server config --validate        # Check configuration and environment\n    \
                  FOLIO_NEW_PASSWORD=... folio-server user create --username me --email me@example.com --super-admin"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "folio.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (the default)
    Serve,

    /// Show configuration information
    Config {
        /// Validate the configuration file and referenced environment variables
        #[arg(long)]
        validate: bool,
    },

    /// Manage admin accounts
    #[command(subcommand)]
    User(UserCommands),
}

/// Account management subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum UserCommands {
    /// Create an account
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password for the new account
        #[arg(long, env = "FOLIO_NEW_PASSWORD", hide_env_values = true)]
        password: String,

        /// Grant the super_admin role
        #[arg(long)]
        super_admin: bool,
    },

    /// List accounts
    List,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
