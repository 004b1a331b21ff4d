use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::LauncherConfig;

const APP_NAME: &str = "DocsLauncher";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific project directories for the application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "docslauncher", APP_NAME)
}

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    project_dirs().map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

fn resolve_path(path_override: Option<&Path>) -> Result<PathBuf> {
    match path_override {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the launcher configuration.
///
/// If the file doesn't exist, a default one is written. If it cannot be
/// parsed, a warning is logged and the defaults are used instead.
pub fn load_config(path_override: Option<&Path>) -> Result<LauncherConfig> {
    let config_path = resolve_path(path_override)?;

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = LauncherConfig::default();
        save_config(&default_config, Some(&config_path))?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

    match serde_json::from_str::<LauncherConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(LauncherConfig::default())
        }
    }
}

/// Saves the provided configuration, creating the parent directory on demand.
pub fn save_config(config: &LauncherConfig, path_override: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(path_override)?;

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.docslauncher.DocsLauncher/
// Linux:   ~/.config/docslauncher/
// Windows: %APPDATA%/docslauncher/DocsLauncher/config/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config, LauncherConfig::default());
        assert!(path.is_file());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let raw = r#"{ "serve": { "port": 9001 }, "online_url": "https://example.org/docs/" }"#;
        fs::write(&path, raw).unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.serve.port, 9001);
        assert_eq!(config.serve.host, "127.0.0.1");
        assert!(config.serve.open_browser);
        assert_eq!(config.index_file, "index.html");
        assert_eq!(config.online_url.as_deref(), Some("https://example.org/docs/"));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config, LauncherConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = LauncherConfig::default();
        config.docs_root = Some(dir.path().join("docs"));
        config.serve.open_browser = false;

        save_config(&config, Some(&path)).unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }
}
