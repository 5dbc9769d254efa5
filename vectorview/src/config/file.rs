//! Configuration file handling for ~/.vectorview/config.ini.
//!
//! Loads and saves the viewer configuration with sensible defaults. Every
//! key is optional; a missing file yields the default configuration.

use super::defaults::{config_file_path, DEFAULT_PROBE_TIMEOUT_MS};
use super::settings::ViewerConfig;
use crate::endpoint::DeployContext;
use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const SECTION_ENDPOINTS: &str = "endpoints";
const SECTION_VIEWER: &str = "viewer";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    Write(std::io::Error),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    Directory(std::io::Error),
}

impl ViewerConfig {
    /// Load from the default path, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific path, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path)?;
        Ok(Self::from_ini(&ini))
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::Directory)?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(ConfigFileError::Write)
    }

    /// Create the default config file if it doesn't exist; returns its path.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(SECTION_ENDPOINTS)) {
            if let Some(v) = section.get("self_hosted_static") {
                config.self_hosted_static = v.to_string();
            }
            if let Some(v) = section.get("self_hosted_dynamic") {
                config.self_hosted_dynamic = v.to_string();
            }
            if let Some(v) = section.get("self_hosted_health") {
                config.self_hosted_health = v.to_string();
            }
            if let Some(v) = section.get("fallback_static") {
                config.fallback_static = v.to_string();
            }
            if let Some(v) = section.get("probe_timeout_ms") {
                config.probe_timeout_ms = v.parse().unwrap_or_else(|_| {
                    warn!(value = v, "invalid probe_timeout_ms, using default");
                    DEFAULT_PROBE_TIMEOUT_MS
                });
            }
        }

        if let Some(section) = ini.section(Some(SECTION_VIEWER)) {
            if let Some(v) = section.get("assets_base") {
                config.assets_base = v.to_string();
            }
            if let Some(v) = section.get("archive_name") {
                config.archive_name = v.to_string();
            }
            if let Some(v) = section.get("context") {
                config.context = match v {
                    "local" => DeployContext::Local,
                    "hosted" => DeployContext::Hosted,
                    other => {
                        warn!(value = other, "invalid context, using local");
                        DeployContext::Local
                    }
                };
            }
            if let Some(v) = section.get("theme") {
                config.default_theme = v.to_string();
            }
            if let Some(v) = section.get("language") {
                config.default_language = v.to_string();
            }
        }

        config
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION_ENDPOINTS))
            .set("self_hosted_static", &self.self_hosted_static)
            .set("self_hosted_dynamic", &self.self_hosted_dynamic)
            .set("self_hosted_health", &self.self_hosted_health)
            .set("fallback_static", &self.fallback_static)
            .set("probe_timeout_ms", self.probe_timeout_ms.to_string());
        ini.with_section(Some(SECTION_VIEWER))
            .set("assets_base", &self.assets_base)
            .set("archive_name", &self.archive_name)
            .set(
                "context",
                match self.context {
                    DeployContext::Local => "local",
                    DeployContext::Hosted => "hosted",
                },
            )
            .set("theme", &self.default_theme)
            .set("language", &self.default_language);
        ini
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::load_from(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let config = ViewerConfig::default()
            .with_context(DeployContext::Hosted)
            .with_fallback("https://cdn.example.org");
        config.save_to(&path).unwrap();

        let loaded = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[viewer]\ntheme = dark\n").unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.default_theme, "dark");
        assert_eq!(config.fallback_static, ViewerConfig::default().fallback_static);
    }

    #[test]
    fn invalid_values_fall_back_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(
            &path,
            "[endpoints]\nprobe_timeout_ms = soon\n[viewer]\ncontext = cloud\n",
        )
        .unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.probe_timeout_ms, DEFAULT_PROBE_TIMEOUT_MS);
        assert_eq!(config.context, DeployContext::Local);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.ini");
        ViewerConfig::default().save_to(&path).unwrap();
        assert!(path.exists());
    }
}
