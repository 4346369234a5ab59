use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::app_config::AppConfig;

static CONFIG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();
static VERBOSE: OnceLock<bool> = OnceLock::new();

/// Initialize the global CLI context.
/// If `custom_config` is provided, uses that path; otherwise the platform
/// config directory.
pub fn init(custom_config: Option<&str>, verbose: bool) {
    let path = custom_config
        .map(PathBuf::from)
        .or_else(AppConfig::default_path);
    let _ = CONFIG_PATH.set(path);
    let _ = VERBOSE.set(verbose);
}

/// Path of the config file, if one could be determined.
pub fn config_path() -> Option<PathBuf> {
    CONFIG_PATH
        .get()
        .cloned()
        .unwrap_or_else(AppConfig::default_path)
}

pub fn is_verbose() -> bool {
    VERBOSE.get().copied().unwrap_or(false)
}
