//! Endpoint selection with a bounded-timeout health probe.
//!
//! The resolver probes the self-hosted stack once per session and prefers it
//! when reachable (it serves byte ranges and offers dynamic tiles); otherwise
//! the static fallback host is used. A dead self-hosted endpoint cannot stall
//! page load: the probe is bounded by a timeout that cancels the in-flight
//! request.

use super::types::{DeployContext, EndpointClass, EndpointSet, Endpoints};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Default health probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Session-scoped endpoint resolver.
pub struct EndpointResolver {
    endpoints: Endpoints,
    context: DeployContext,
    probe_timeout: Duration,
    client: reqwest::Client,
    selected: OnceCell<EndpointClass>,
}

impl EndpointResolver {
    /// Create a resolver over the configured endpoint sets.
    pub fn new(endpoints: Endpoints, context: DeployContext, client: reqwest::Client) -> Self {
        Self {
            endpoints,
            context,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            client,
            selected: OnceCell::new(),
        }
    }

    /// Override the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// The deployment context this resolver was built for.
    pub fn context(&self) -> DeployContext {
        self.context
    }

    /// Issue a single liveness check against `health_url`.
    ///
    /// Returns `true` only for a timely 2xx. Timeouts, network failures, and
    /// error statuses all yield `false`; this never returns an error. The
    /// timeout cancels the in-flight request by dropping it.
    pub async fn probe(&self, health_url: &str) -> bool {
        let request = self.client.get(health_url).send();
        match tokio::time::timeout(self.probe_timeout, request).await {
            Ok(Ok(response)) if response.status().is_success() => {
                debug!(url = health_url, "health probe ok");
                true
            }
            Ok(Ok(response)) => {
                debug!(
                    url = health_url,
                    status = response.status().as_u16(),
                    "health probe rejected"
                );
                false
            }
            Ok(Err(e)) => {
                debug!(url = health_url, error = %e, "health probe failed");
                false
            }
            Err(_) => {
                debug!(
                    url = health_url,
                    timeout_ms = self.probe_timeout.as_millis() as u64,
                    "health probe timed out"
                );
                false
            }
        }
    }

    /// The endpoint class this session uses, probing on first call.
    ///
    /// Memoized for the lifetime of the resolver: the probe runs once, not
    /// per tile request. Both local and hosted contexts prefer the
    /// self-hosted stack when its health check answers.
    pub async fn select(&self) -> EndpointClass {
        *self
            .selected
            .get_or_init(|| async {
                let healthy = match self.endpoints.self_hosted.health_url.as_deref() {
                    Some(url) => self.probe(url).await,
                    None => false,
                };
                let class = if healthy {
                    EndpointClass::SelfHosted
                } else {
                    EndpointClass::Fallback
                };
                info!(context = %self.context, class = %class, "endpoint selected");
                class
            })
            .await
    }

    /// The endpoint set of the selected class.
    pub async fn endpoint_set(&self) -> &EndpointSet {
        self.endpoints.for_class(self.select().await)
    }

    /// URL of a named archive on the selected class's static path.
    pub async fn static_archive_url(&self, name: &str) -> String {
        self.endpoint_set().await.static_archive_url(name)
    }

    /// Dynamic-tile URL template for a catalog source, with literal
    /// `{z}/{x}/{y}` placeholders.
    ///
    /// Available only under [`EndpointClass::SelfHosted`]; callers treat
    /// dynamic-source layers as optional and omit them otherwise.
    pub async fn dynamic_tile_template(&self, source_id: &str) -> Option<String> {
        match self.select().await {
            EndpointClass::SelfHosted => {
                self.endpoints.self_hosted.dynamic_base.as_deref().map(|base| {
                    format!(
                        "{}/mvt/{}/{{z}}/{{x}}/{{y}}.mvt",
                        base.trim_end_matches('/'),
                        source_id
                    )
                })
            }
            EndpointClass::Fallback => None,
        }
    }

    /// Catalog listing URL, only meaningful with a dynamic backend.
    pub async fn catalog_url(&self) -> Option<String> {
        match self.select().await {
            EndpointClass::SelfHosted => self
                .endpoints
                .self_hosted
                .dynamic_base
                .as_deref()
                .map(|base| format!("{}/catalog", base.trim_end_matches('/'))),
            EndpointClass::Fallback => None,
        }
    }
}
