//! Application configuration
//!
//! Camera, viewport and display settings persisted as RON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use drape_core::DisplaySettings;
use drape_renderer::RendererConfig;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "drape.ron";

/// Environment variable overriding the configuration path
pub const CONFIG_PATH_ENV: &str = "DRAPE_CONFIG";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Parse from RON, repairing unusable camera limits
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.renderer.camera = config.renderer.camera.sanitized();
        Ok(config)
    }
}

/// Loads and saves [`AppConfig`] at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manager for `$DRAPE_CONFIG`, or `drape.ron` in the working directory
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Io(e.to_string()))?;
        AppConfig::from_ron(&content)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = config.to_ron()?;
        std::fs::write(&self.path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Load the configuration, falling back to defaults if the file is
    /// missing or invalid
    pub fn load_or_default(&self) -> AppConfig {
        if !self.path.exists() {
            tracing::debug!("No config at {}, using defaults", self.path.display());
            return AppConfig::default();
        }
        match self.load() {
            Ok(config) => {
                tracing::info!("Loaded config from {}", self.path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", self.path.display(), e);
                AppConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drape_core::ViewMode;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join(CONFIG_FILE_NAME));

        let mut config = AppConfig::default();
        config.renderer.camera.zoom_speed = 25.0;
        config.display.view = ViewMode::Block("L-1".to_string());
        config.display.disable_layer(3);
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().join("missing.ron"));
        assert!(matches!(manager.load(), Err(ConfigError::Io(_))));
        assert_eq!(manager.load_or_default(), AppConfig::default());
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not ron at all {").unwrap();

        let manager = ConfigManager::new(&path);
        assert!(matches!(manager.load(), Err(ConfigError::Deserialize(_))));
        assert_eq!(manager.load_or_default(), AppConfig::default());
    }

    #[test]
    fn test_inverted_camera_limits_are_swapped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "(renderer: (camera: (min_distance: -5000.0, max_distance: -5.0)))",
        )
        .unwrap();

        let config = ConfigManager::new(&path).load_or_default();
        assert_eq!(config.renderer.camera.min_distance, -5.0);
        assert_eq!(config.renderer.camera.max_distance, -5000.0);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_ron("(renderer: (camera: (friction: 0.5)))").unwrap();
        assert_eq!(config.renderer.camera.friction, 0.5);
        assert_eq!(config.display, DisplaySettings::default());
    }
}
