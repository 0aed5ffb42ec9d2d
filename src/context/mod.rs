//! Per-surface synchronization context.
//!
//! One [`SyncContext`] per map surface, identified by a scope key. It owns
//! everything the engine needs between calls: both marker registries, the
//! cached last snapshot (for re-deriving detail markers without a new
//! fetch), the current zoom mode, and the listener token it attached to
//! the surface. There is no global state: independent map surfaces each
//! get an independent context, created by `MarkerEngine::initialize` and
//! torn down by `dispose`.

use tracing::debug;

use crate::record::Snapshot;
use crate::surface::{ListenerToken, MapSurface};
use crate::sync::{clear_layer, MarkerRegistry};
use crate::zoom::ZoomMode;

/// All mutable state for one map surface.
///
/// Single-threaded by design: mutation happens on the one UI thread the
/// host runs, so there is no locking discipline beyond not blocking it.
pub struct SyncContext<S: MapSurface> {
    scope_key: String,
    pub(crate) surface: S,
    pub(crate) aggregate: MarkerRegistry,
    pub(crate) detail: MarkerRegistry,
    pub(crate) cached_snapshot: Option<Snapshot>,
    pub(crate) mode: ZoomMode,
    pub(crate) threshold: u8,
    pub(crate) listener: Option<ListenerToken>,
    pub(crate) last_version: u64,
    disposed: bool,
}

impl<S: MapSurface> SyncContext<S> {
    pub(crate) fn new(surface: S, scope_key: String, threshold: u8) -> Self {
        Self {
            scope_key,
            surface,
            aggregate: MarkerRegistry::new(),
            detail: MarkerRegistry::new(),
            cached_snapshot: None,
            mode: ZoomMode::Aggregate,
            threshold,
            listener: None,
            last_version: 0,
            disposed: false,
        }
    }

    /// Scope key identifying this map surface.
    pub fn scope_key(&self) -> &str {
        &self.scope_key
    }

    /// Current zoom mode.
    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    /// Currently configured hybrid zoom threshold.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Version of the last applied snapshot (0 before any sync).
    pub fn last_version(&self) -> u64 {
        self.last_version
    }

    /// Number of live markers on the aggregate layer.
    pub fn aggregate_marker_count(&self) -> usize {
        self.aggregate.len()
    }

    /// Number of live markers on the detail layer.
    pub fn detail_marker_count(&self) -> usize {
        self.detail.len()
    }

    /// Whether a snapshot is cached for detail re-derivation.
    pub fn has_cached_snapshot(&self) -> bool {
        self.cached_snapshot.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Borrow the owned surface, for host-side inspection.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tear down this context: detach the zoom listener, remove every
    /// live marker (best effort), and clear all cached state.
    ///
    /// Idempotent; all later engine calls on a disposed context are
    /// no-ops with a failure indicator.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(token) = self.listener.take() {
            self.surface.detach_zoom_listener(token);
        }
        let aggregate_removed = clear_layer(&mut self.surface, &mut self.aggregate);
        let detail_removed = clear_layer(&mut self.surface, &mut self.detail);
        self.cached_snapshot = None;
        self.disposed = true;

        debug!(
            scope = %self.scope_key,
            aggregate_removed,
            detail_removed,
            "Sync context disposed"
        );
    }
}
