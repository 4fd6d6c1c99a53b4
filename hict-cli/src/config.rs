//! Configuration handling for the HiCT CLI
//!
//! Supports loading configuration from hict.toml files; every field has a default.

use anyhow::{Context, Result};
use hict_core::ResolutionTable;
use hict_map::{Platform, ViewOptions, WheelZoomOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub zoom: WheelZoomOptions,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Viewport width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Viewport height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Resolution ratio between consecutive zoom levels
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,

    #[serde(default)]
    pub min_zoom: f64,

    /// Deepest zoom; derived from the session's finest resolution when unset
    #[serde(default)]
    pub max_zoom: Option<f64>,

    /// Snap the view to whole zoom levels
    #[serde(default)]
    pub constrain_resolution: bool,
}

// Default value functions
fn default_width() -> u32 { 1024 }
fn default_height() -> u32 { 768 }
fn default_zoom_factor() -> f64 { 2.0 }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            zoom_factor: default_zoom_factor(),
            min_zoom: 0.0,
            max_zoom: None,
            constrain_resolution: false,
        }
    }
}

impl ViewConfig {
    pub fn size(&self) -> [f64; 2] {
        [self.width as f64, self.height as f64]
    }

    /// View zoom range for a session with resolution table `table`
    pub fn view_options(&self, table: &ResolutionTable) -> ViewOptions {
        let mut options = ViewOptions::for_table(table, self.zoom_factor);
        options.min_zoom = self.min_zoom;
        if let Some(max_zoom) = self.max_zoom {
            options.max_zoom = max_zoom;
        } else {
            options.max_zoom += self.min_zoom;
        }
        options.constrain_resolution = self.constrain_resolution;
        options
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("hict.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: hict.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        if config.zoom.delta_per_zoom <= 0.0 || config.view.zoom_factor <= 1.0 {
            return Err(crate::error::CliError::config(
                "zoom.delta_per_zoom must be positive and view.zoom_factor greater than 1",
            )
            .into());
        }

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.zoom.delta_per_zoom, 300.0);
        assert_eq!(config.zoom.timeout_ms, 80);
        assert_eq!(config.view.width, 1024);
        assert!(!config.platform.firefox);
        assert_eq!(config.platform.device_pixel_ratio, 1.0);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.zoom.max_delta = 3.0;
        config.view.max_zoom = Some(5.0);
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded.zoom, config.zoom);
        assert_eq!(loaded.view.max_zoom, Some(5.0));
        assert_eq!(loaded.platform, config.platform);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[zoom]\ntimeout_ms = 40\n\n[platform]\nfirefox = true")?;

        let config = Config::load_from_file(temp_file.path())?;
        assert_eq!(config.zoom.timeout_ms, 40);
        assert_eq!(config.zoom.duration_ms, 250);
        assert!(config.platform.firefox);
        assert_eq!(config.view.height, 768);
        Ok(())
    }

    #[test]
    fn test_rejects_degenerate_zoom() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[view]\nzoom_factor = 1.0")?;
        assert!(Config::load_from_file(temp_file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_view_options_from_table() {
        let table = ResolutionTable::new(vec![64.0, 16.0, 4.0, 1.0], vec![1000, 250, 50, 10]).unwrap();
        let view = ViewConfig {
            zoom_factor: 4.0,
            ..ViewConfig::default()
        };
        let options = view.view_options(&table);
        assert_eq!(options.max_resolution, 64.0);
        assert_eq!(options.max_zoom, 3.0);
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[zoom]"));
        assert!(example.contains("[view]"));
        assert!(example.contains("[platform]"));
        Ok(())
    }
}
