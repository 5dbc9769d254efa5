//! Endpoint classes and their capability sets.

use std::fmt;

/// Category of serving backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointClass {
    /// Self-hosted stack: byte-range static serving plus a dynamic tile
    /// generator and a health check.
    SelfHosted,
    /// Public fallback host: static archives only.
    Fallback,
}

impl fmt::Display for EndpointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointClass::SelfHosted => write!(f, "self-hosted"),
            EndpointClass::Fallback => write!(f, "fallback"),
        }
    }
}

/// Deployment context the viewer runs in.
///
/// Both contexts probe the self-hosted stack and prefer it when reachable;
/// the context only decides which configured bases are meaningful (loopback
/// versus public names).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployContext {
    /// Local development page
    Local,
    /// Publicly hosted page
    Hosted,
}

impl fmt::Display for DeployContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployContext::Local => write!(f, "local"),
            DeployContext::Hosted => write!(f, "hosted"),
        }
    }
}

/// Named sub-resources of one endpoint class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    /// Base URL for static archive serving
    pub static_base: String,
    /// Base URL of the dynamic tile generator, when the class has one
    pub dynamic_base: Option<String>,
    /// Liveness check URL, when the class has one
    pub health_url: Option<String>,
}

impl EndpointSet {
    /// Full capability set for a self-hosted stack.
    pub fn self_hosted(
        static_base: impl Into<String>,
        dynamic_base: impl Into<String>,
        health_url: impl Into<String>,
    ) -> Self {
        Self {
            static_base: static_base.into(),
            dynamic_base: Some(dynamic_base.into()),
            health_url: Some(health_url.into()),
        }
    }

    /// Static-only capability set for the fallback host.
    pub fn fallback(static_base: impl Into<String>) -> Self {
        Self {
            static_base: static_base.into(),
            dynamic_base: None,
            health_url: None,
        }
    }

    /// URL of a named archive under this class's static path.
    pub fn static_archive_url(&self, name: &str) -> String {
        format!("{}/static/{}", self.static_base.trim_end_matches('/'), name)
    }
}

/// The configured endpoint sets, one per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub self_hosted: EndpointSet,
    pub fallback: EndpointSet,
}

impl Endpoints {
    /// The set for a given class.
    pub fn for_class(&self, class: EndpointClass) -> &EndpointSet {
        match class {
            EndpointClass::SelfHosted => &self.self_hosted,
            EndpointClass::Fallback => &self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_archive_url_joins_cleanly() {
        let set = EndpointSet::fallback("https://tiles.example.org/");
        assert_eq!(
            set.static_archive_url("basemap.pmtiles"),
            "https://tiles.example.org/static/basemap.pmtiles"
        );
    }

    #[test]
    fn fallback_set_has_no_dynamic_capability() {
        let set = EndpointSet::fallback("https://tiles.example.org");
        assert!(set.dynamic_base.is_none());
        assert!(set.health_url.is_none());
    }

    #[test]
    fn class_display_is_stable() {
        assert_eq!(EndpointClass::SelfHosted.to_string(), "self-hosted");
        assert_eq!(EndpointClass::Fallback.to_string(), "fallback");
    }
}
