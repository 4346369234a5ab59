use std::path::PathBuf;

use crate::core::models::http_error::HttpError;

/// All domain errors for ghkey.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum GhKeyError {
    #[error(
        "Invalid GPG key format\n\n  \
         The key must be ASCII-armored and start with:\n    \
         -----BEGIN PGP PUBLIC KEY BLOCK-----\n\n  \
         Export one with: gpg --armor --export <key-id>"
    )]
    InvalidKeyFormat,

    #[error(
        "Insufficient OAuth scopes for {hostname}\n\n  \
         The token cannot manage GPG keys on this account.\n\n  \
         Solutions:\n    \
         → Grant the write:gpg_key scope to your token\n    \
         → Then retry: ghkey add <key-file>"
    )]
    InsufficientScope { hostname: String },

    #[error(
        "Invalid GPG key: the server rejected it\n\n  \
         The key is armored but could not be read as a public key.\n  \
         Make sure you exported the PUBLIC key, not a secret key or signature."
    )]
    InvalidKey,

    #[error(transparent)]
    Api(#[from] HttpError),

    #[error("Request failed: {reason}")]
    Transport { reason: String },

    #[error(
        "GPG key file missing\n\n  \
         Pass a file path or pipe the key on stdin:\n    \
         → ghkey add key.asc\n    \
         → gpg --armor --export <key-id> | ghkey add"
    )]
    KeyFileMissing,

    #[error("File not found: {path}\n\n  Check that the path is correct and the file exists.")]
    FileNotFound { path: PathBuf },

    #[error(
        "Not authenticated with {hostname}\n\n  \
         Solutions:\n    \
         → Pass a token: ghkey --token <token> add <key-file>\n    \
         → Or set GH_TOKEN in your environment\n    \
         → Or add a token under [hosts.\"{hostname}\"] in config.toml"
    )]
    NotAuthenticated { hostname: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GhKeyError>;
