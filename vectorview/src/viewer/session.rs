//! The view session: ownership root of the core and the recomposition flow.

use crate::archive::{parse_header, ArchiveError, ArchiveHandle, ArchiveRegistry, DROPPED_KEY};
use crate::config::ViewerConfig;
use crate::endpoint::EndpointResolver;
use crate::geo::Bounds;
use crate::protocol::TileProtocol;
use crate::state::{self, TileSourceRef, ViewState};
use crate::style::{
    self, ComposeRequest, PublishedStyles, SpriteMode, StyleComposer, StyleDocument, Theme,
};
use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while constructing a session.
#[derive(Debug, Error)]
pub enum ViewError {
    /// HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// A composed view ready to hand to the rendering engine.
#[derive(Debug, Clone)]
pub struct ComposedView {
    /// The style document
    pub style: StyleDocument,
    /// Extent of the resolved archive, when known
    pub bounds: Option<Bounds>,
    /// Non-fatal compatibility advisory, when versions mismatch
    pub advisory: Option<String>,
}

/// Owns the registry, the endpoint resolver, the tile-protocol intercept,
/// and the current view state.
///
/// All state changes bump a generation counter; [`recompose_at`] applies a
/// result only when its generation is still current, so a slow recomposition
/// started for an older state can never overwrite a newer one
/// (last-state-wins).
///
/// [`recompose_at`]: ViewSession::recompose_at
pub struct ViewSession {
    config: ViewerConfig,
    client: reqwest::Client,
    registry: Arc<ArchiveRegistry>,
    resolver: EndpointResolver,
    composer: StyleComposer,
    published: PublishedStyles,
    protocol: TileProtocol,
    state: Mutex<ViewState>,
    generation: AtomicU64,
}

impl ViewSession {
    /// Create a session from configuration.
    pub fn new(config: ViewerConfig) -> Result<Self, ViewError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ViewError::HttpClient(e.to_string()))?;

        let registry = Arc::new(ArchiveRegistry::new());
        let resolver = EndpointResolver::new(config.endpoints(), config.context, client.clone())
            .with_probe_timeout(config.probe_timeout());
        let composer = StyleComposer::new(config.assets_base.clone());
        let published = PublishedStyles::new(client.clone(), config.assets_base.clone());
        let protocol = TileProtocol::new(Arc::clone(&registry));

        let mut initial = ViewState::default();
        initial.theme = config.default_theme.clone();
        initial.language = config.default_language.clone();

        Ok(Self {
            config,
            client,
            registry,
            resolver,
            composer,
            published,
            protocol,
            state: Mutex::new(initial),
            generation: AtomicU64::new(0),
        })
    }

    /// The archive registry (shared with the protocol intercept).
    pub fn registry(&self) -> &Arc<ArchiveRegistry> {
        &self.registry
    }

    /// The tile-protocol intercept to register with the rendering engine at
    /// mount. Dropping the session unregisters it implicitly: the intercept
    /// lives exactly as long as the session that owns it.
    pub fn protocol(&self) -> &TileProtocol {
        &self.protocol
    }

    /// The endpoint resolver (probe state is session-memoized).
    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.lock_state().clone()
    }

    /// The current generation stamp.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Install a new view state; returns the new generation stamp.
    pub fn set_state(&self, state: ViewState) -> u64 {
        *self.lock_state() = state;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "view state updated");
        generation
    }

    /// Apply a URL fragment to the view state; returns the new stamp.
    pub fn apply_fragment(&self, fragment: &str) -> u64 {
        self.set_state(state::decode(fragment))
    }

    /// Encode the current state into `existing_fragment`, preserving keys
    /// owned by other concerns.
    pub fn fragment(&self, existing_fragment: &str) -> String {
        state::encode(existing_fragment, &self.state())
    }

    /// Install a dropped local archive and switch the view to it.
    ///
    /// The bytes are validated as an archive before anything changes; an
    /// invalid drop leaves both registry and state untouched. On success the
    /// new handle displaces whatever lived under the dropped key and the
    /// source flips to [`TileSourceRef::Dropped`]; returns the handle and
    /// the new generation stamp.
    pub fn drop_local_archive(
        &self,
        name: &str,
        bytes: impl Into<Bytes>,
    ) -> Result<(Arc<ArchiveHandle>, u64), ArchiveError> {
        let bytes = bytes.into();
        parse_header(&bytes)?;

        let handle = self
            .registry
            .replace(ArchiveHandle::from_dropped(name, bytes));
        info!(name, "local archive dropped");

        let mut state = self.state();
        state.source = TileSourceRef::Dropped;
        let generation = self.set_state(state);
        Ok((handle, generation))
    }

    /// Recompose for the current generation.
    pub async fn recompose(&self) -> ComposedView {
        // Always current by construction, so the result is always Some.
        match self.recompose_at(self.current_generation()).await {
            Some(view) => view,
            None => ComposedView {
                style: StyleDocument::empty("empty"),
                bounds: None,
                advisory: None,
            },
        }
    }

    /// Recompose for an explicit generation stamp.
    ///
    /// Returns `None` when the stamp is no longer current by the time the
    /// result is ready; the caller discards it and waits for the
    /// recomposition already running for the newer state.
    pub async fn recompose_at(&self, generation: u64) -> Option<ComposedView> {
        let state = self.state();

        let source_ref = self.resolve_source_ref(&state).await;

        let mut bounds = None;
        let mut advisory = None;
        if let Some(reference) = source_ref.as_deref() {
            if let Some(handle) = self.archive_for(reference) {
                match handle.metadata().await {
                    Ok(metadata) => {
                        if let Some(tileset_version) = metadata.version() {
                            let style_major = state
                                .style_version
                                .as_deref()
                                .and_then(style::version_major)
                                .unwrap_or(style::STYLE_MAJOR);
                            let result = style::check(style_major, tileset_version);
                            if !result.compatible {
                                advisory = result.message;
                            }
                        }
                    }
                    Err(e) => {
                        // Transient by taxonomy: the view degrades, the
                        // rendering engine reports its own tile errors.
                        warn!(key = handle.key(), error = %e, "archive metadata unavailable");
                    }
                }
                match handle.bounds().await {
                    Ok(b) => bounds = Some(b),
                    Err(e) => warn!(key = handle.key(), error = %e, "archive bounds unavailable"),
                }
            }
        }

        let override_layers = match state.style_version.as_deref() {
            Some(version) if !version.is_empty() => {
                self.published.fetch_layers(&state.theme, version).await
            }
            _ => None,
        };

        let style = self.composer.compose(ComposeRequest {
            theme: Theme::named(&state.theme),
            language: &state.language,
            source_ref: source_ref.as_deref(),
            sprite_mode: if state.local_sprites {
                SpriteMode::Local
            } else {
                SpriteMode::Remote
            },
            override_layers,
        });

        if self.current_generation() != generation {
            debug!(generation, "recomposition superseded, discarding");
            return None;
        }

        Some(ComposedView {
            style,
            bounds,
            advisory,
        })
    }

    /// Resolve the state's source selection to a concrete reference.
    async fn resolve_source_ref(&self, state: &ViewState) -> Option<String> {
        match &state.source {
            TileSourceRef::Url(url) => Some(url.clone()),
            TileSourceRef::Dropped => {
                if self.registry.get(DROPPED_KEY).is_some() {
                    Some(DROPPED_KEY.to_string())
                } else {
                    // A shared fragment can say "dropped" without the file;
                    // nothing to show until the user drops it again.
                    debug!("dropped source selected but no archive registered");
                    None
                }
            }
            TileSourceRef::Default => Some(
                self.resolver
                    .static_archive_url(&self.config.archive_name)
                    .await,
            ),
        }
    }

    /// The registry handle backing an archive reference, if it is one.
    fn archive_for(&self, reference: &str) -> Option<Arc<ArchiveHandle>> {
        if reference == DROPPED_KEY {
            return self.registry.get(DROPPED_KEY);
        }
        if !style::is_archive_url(reference) {
            return None;
        }
        self.registry
            .get_or_create(reference, || {
                Ok(ArchiveHandle::from_url(self.client.clone(), reference))
            })
            .ok()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
