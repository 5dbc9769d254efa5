//! Viewer configuration.

use super::defaults::*;
use crate::endpoint::{DeployContext, EndpointSet, Endpoints};
use crate::state::DEFAULT_LANGUAGE;
use crate::style::DEFAULT_THEME;
use std::time::Duration;

/// Complete viewer configuration.
///
/// Loaded from `~/.vectorview/config.ini` (every key optional, defaults
/// applied) or built programmatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Static base of the self-hosted stack
    pub self_hosted_static: String,
    /// Dynamic tile base of the self-hosted stack
    pub self_hosted_dynamic: String,
    /// Health URL of the self-hosted stack
    pub self_hosted_health: String,
    /// Static base of the fallback host
    pub fallback_static: String,
    /// Sprite/glyph/style asset base
    pub assets_base: String,
    /// Default archive name under the static path
    pub archive_name: String,
    /// Health probe timeout in milliseconds
    pub probe_timeout_ms: u64,
    /// Deployment context
    pub context: DeployContext,
    /// Theme applied when the fragment names none
    pub default_theme: String,
    /// Label language applied when the fragment names none
    pub default_language: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            self_hosted_static: DEFAULT_SELF_HOSTED_STATIC.to_string(),
            self_hosted_dynamic: DEFAULT_SELF_HOSTED_DYNAMIC.to_string(),
            self_hosted_health: DEFAULT_SELF_HOSTED_HEALTH.to_string(),
            fallback_static: DEFAULT_FALLBACK_STATIC.to_string(),
            assets_base: DEFAULT_ASSETS_BASE.to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            context: DeployContext::Local,
            default_theme: DEFAULT_THEME.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ViewerConfig {
    /// The endpoint sets this configuration describes.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            self_hosted: EndpointSet::self_hosted(
                self.self_hosted_static.clone(),
                self.self_hosted_dynamic.clone(),
                self.self_hosted_health.clone(),
            ),
            fallback: EndpointSet::fallback(self.fallback_static.clone()),
        }
    }

    /// Probe timeout as a duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Set the deployment context.
    pub fn with_context(mut self, context: DeployContext) -> Self {
        self.context = context;
        self
    }

    /// Set the fallback static base.
    pub fn with_fallback(mut self, base: impl Into<String>) -> Self {
        self.fallback_static = base.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let config = ViewerConfig::default();
        assert_eq!(config.probe_timeout(), Duration::from_millis(2000));
        assert_eq!(config.archive_name, "basemap.pmtiles");
        assert_eq!(config.context, DeployContext::Local);
    }

    #[test]
    fn endpoints_carry_capabilities_per_class() {
        let endpoints = ViewerConfig::default().endpoints();
        assert!(endpoints.self_hosted.dynamic_base.is_some());
        assert!(endpoints.self_hosted.health_url.is_some());
        assert!(endpoints.fallback.dynamic_base.is_none());
    }

    #[test]
    fn builder_methods_compose() {
        let config = ViewerConfig::default()
            .with_context(DeployContext::Hosted)
            .with_fallback("https://cdn.example.org");
        assert_eq!(config.context, DeployContext::Hosted);
        assert_eq!(config.fallback_static, "https://cdn.example.org");
    }
}
