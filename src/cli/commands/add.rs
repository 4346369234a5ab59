use std::io::{self, IsTerminal, Read};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::adapters::http::reqwest_transport::ReqwestTransport;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{GhKeyError, Result};
use crate::core::services::key_uploader::{KeyUploader, UploadOutcome};

/// Execute the `ghkey add` command.
///
/// Resolves the host and token, reads the key from `file` (or stdin) and
/// uploads it to the account.
pub fn execute(file: Option<&str>, hostname: Option<&str>, token: Option<&str>) -> Result<()> {
    let config = match context::config_path() {
        Some(path) => {
            output::detail(&format!("Config: {}", path.display()));
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    let hostname = config.resolve_hostname(hostname);
    let host_entry = config.host(&hostname);

    let token = token
        .map(str::to_string)
        .or_else(|| host_entry.and_then(|h| h.token.clone()))
        .ok_or_else(|| GhKeyError::NotAuthenticated {
            hostname: hostname.clone(),
        })?;

    let mut transport = ReqwestTransport::new(token);
    if let Some(timeout) = host_entry.and_then(|h| h.timeout()) {
        transport = transport.with_timeout(timeout);
    }

    let uploader = match host_entry.and_then(|h| h.api_url.as_deref()) {
        Some(api_url) => {
            if api_url.starts_with("http://") && !is_loopback(api_url) {
                output::warning(&format!(
                    "api_url for {hostname} uses plain HTTP; the token is sent unencrypted"
                ));
            }
            KeyUploader::with_api_prefix(transport, &hostname, api_url)
        }
        None => KeyUploader::for_host(transport, &hostname),
    };

    let key_source = open_key_source(file)?;
    output::detail(&format!("POST {}", uploader.upload_url()));

    let sp = output::spinner("Uploading GPG key...");
    let result = uploader.upload(key_source);
    match result {
        Ok(UploadOutcome::Added) => {
            output::finish_spinner(sp, "GPG key added to your account");
            Ok(())
        }
        Ok(UploadOutcome::AlreadyExists) => {
            output::finish_spinner(sp, "GPG key already exists on your account");
            Ok(())
        }
        Err(e) => {
            sp.finish_and_clear();
            Err(e)
        }
    }
}

/// Open the key file, or stdin when no file (or `-`) is given.
///
/// Refuses to block on an interactive terminal.
fn open_key_source(file: Option<&str>) -> Result<Box<dyn Read>> {
    match file {
        None | Some("-") => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(GhKeyError::KeyFileMissing);
            }
            Ok(Box::new(stdin))
        }
        Some(path) => {
            let path = PathBuf::from(path);
            match std::fs::File::open(&path) {
                Ok(f) => Ok(Box::new(f)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(GhKeyError::FileNotFound { path })
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn is_loopback(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
