pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persisted launcher settings.
///
/// Missing fields fall back to their defaults, so older or hand-written config
/// files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Explicit documentation root. When unset the default install locations
    /// are searched.
    pub docs_root: Option<PathBuf>,
    pub index_file: String,
    /// Opened by the static viewer when no local tree is installed.
    pub online_url: Option<String>,
    pub serve: ServeConfig,
}

/// Settings for the local documentation server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServeConfig {
    pub host: String,
    /// `0` picks a free port.
    pub port: u16,
    pub open_browser: bool,
}

impl LauncherConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            docs_root: None,
            index_file: "index.html".to_string(),
            online_url: None,
            serve: ServeConfig::default(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            open_browser: true,
        }
    }
}
