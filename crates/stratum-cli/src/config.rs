//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//!
//! A configuration file holds a single `[layout]` table:
//!
//! ```toml
//! [layout]
//! direction = "top_to_bottom"
//! default_box_width = 200.0
//! vertical_spacing = 120.0
//! engine = "layered"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use stratum::{StratumError, config::LayoutConfig};

/// Settings read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (stratum/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, StratumError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("stratum/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "stratum", "stratum") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, StratumError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(missing_file(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err| {
        StratumError::new_parse_error(
            path.display().to_string(),
            content.as_str(),
            err.message(),
            err.span(),
        )
    })
}

fn missing_file(path: PathBuf) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("Missing configuration file: {}", path.display()),
    )
}
