//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/polykey/`
//! - macOS: `~/Library/Application Support/polykey/`
//! - Windows: `%APPDATA%\polykey\`
//!
//! ```rust,no_run
//! use polykey_config::paths;
//!
//! println!("config file: {:?}", paths::default_config_path());
//! ```

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "polykey";

/// File name of the configuration file inside [`user_config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to `./polykey` if the platform config directory cannot be
/// determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the default configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Create the user configuration directory if it does not exist.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
        tracing::info!(path = %dir.display(), "created config directory");
    }
    Ok(dir)
}
