pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Upload your armored GPG public key to a GitHub account.
#[derive(Parser, Debug)]
#[command(name = "ghkey", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub host to target (github.com or an Enterprise hostname)
    #[arg(long, global = true, env = "GH_HOST")]
    pub hostname: Option<String>,

    /// API token with the write:gpg_key scope
    #[arg(long, global = true, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a GPG public key to your account
    Add {
        /// Armored public key file (default: read stdin; "-" also means stdin)
        file: Option<String>,
    },
}
