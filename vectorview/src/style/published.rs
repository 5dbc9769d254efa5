//! Published layer-set retrieval.
//!
//! A published style version is a frozen layer array hosted on the asset
//! base. When the view pins one, it replaces the generated stack verbatim.
//! Retrieval failure is transient by taxonomy: the caller falls back to the
//! generated layers, never to an error.

use super::document::StyleLayer;
use tracing::{debug, warn};

/// Client for versioned style assets.
#[derive(Debug, Clone)]
pub struct PublishedStyles {
    client: reqwest::Client,
    assets_base: String,
}

impl PublishedStyles {
    /// Create a client over the configured asset base URL.
    pub fn new(client: reqwest::Client, assets_base: impl Into<String>) -> Self {
        Self {
            client,
            assets_base: assets_base.into(),
        }
    }

    /// URL of the layer set for `theme` at `version`.
    pub fn layer_set_url(&self, theme: &str, version: &str) -> String {
        format!(
            "{}/styles/{}/{}.json",
            self.assets_base.trim_end_matches('/'),
            version,
            theme
        )
    }

    /// Fetch the published layer array, or `None` when unavailable.
    ///
    /// Any failure (network, status, malformed body) logs a warning and
    /// yields `None`; the caller degrades to the generated stack.
    pub async fn fetch_layers(&self, theme: &str, version: &str) -> Option<Vec<StyleLayer>> {
        let url = self.layer_set_url(theme, version);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "published layer set unreachable");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(
                url = %url,
                status = response.status().as_u16(),
                "published layer set not available"
            );
            return None;
        }

        match response.json::<Vec<StyleLayer>>().await {
            Ok(layers) => {
                debug!(url = %url, count = layers.len(), "published layer set loaded");
                Some(layers)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "published layer set malformed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_set_url_shape() {
        let styles = PublishedStyles::new(
            reqwest::Client::new(),
            "https://assets.example.org/",
        );
        assert_eq!(
            styles.layer_set_url("dark", "v3.2"),
            "https://assets.example.org/styles/v3.2/dark.json"
        );
    }

    #[tokio::test]
    async fn unreachable_asset_base_yields_none() {
        let styles = PublishedStyles::new(
            reqwest::Client::builder()
                .timeout(std::time::Duration::from_millis(200))
                .build()
                .unwrap(),
            "http://127.0.0.1:1",
        );
        assert!(styles.fetch_layers("light", "v3").await.is_none());
    }
}
