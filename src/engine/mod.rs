//! Boundary facade for host applications.
//!
//! [`MarkerEngine`] wires the resolver, bucketing, synchronizer, hybrid
//! zoom controller, and viewport fitter behind the handful of operations
//! a host calls. The engine itself is stateless apart from configuration;
//! all per-surface state lives in the [`SyncContext`] it hands out.
//!
//! # Example
//!
//! ```ignore
//! use cartomark::engine::{EngineConfig, MarkerEngine};
//!
//! let engine = MarkerEngine::new(EngineConfig::default())?;
//! let mut ctx = engine.initialize(surface, "main-map", center, 12);
//!
//! engine.sync_aggregate(&mut ctx, &snapshot);
//! engine.fit_view(&mut ctx, 24);
//!
//! // Wired to the map's zoom event by the host:
//! engine.handle_zoom_change(&mut ctx, 14);
//!
//! engine.dispose(&mut ctx);
//! ```

mod config;
mod error;

pub use config::{
    EngineConfig, DEFAULT_FIT_PADDING_PX, DEFAULT_HYBRID_THRESHOLD, DEFAULT_TOLERANCE_M,
};
pub use error::EngineError;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::bundle::{bucket, summarize, summarize_all, Bundle, BundleKey};
use crate::context::SyncContext;
use crate::coord::GeoPoint;
use crate::record::{tag_records, ResolveStats, Snapshot, TaggedRecord};
use crate::surface::{MapSurface, MarkerLayer};
use crate::sync::{clear_layer, sync_layer, SyncReport};
use crate::viewport;
use crate::zoom::ZoomMode;

/// Result of a sync call.
///
/// Precondition failures are reported here instead of raised: calls may
/// legitimately race with asynchronous surface setup or teardown on the
/// host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The snapshot was applied; counts describe the work done.
    Applied {
        report: SyncReport,
        resolve: ResolveStats,
    },
    /// The context was already disposed; nothing happened.
    SkippedDisposed,
    /// The snapshot's version was not newer than the last applied one.
    SkippedStale,
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }

    /// The sync report, when the snapshot was applied.
    pub fn report(&self) -> Option<SyncReport> {
        match self {
            SyncOutcome::Applied { report, .. } => Some(*report),
            _ => None,
        }
    }
}

/// Geospatial aggregation and marker synchronization engine.
///
/// Holds configuration only; every piece of mutable state belongs to a
/// [`SyncContext`], so independent map surfaces never share anything.
pub struct MarkerEngine {
    config: EngineConfig,
}

impl MarkerEngine {
    /// Create an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the configuration is unusable
    /// (non-positive tolerance, inverted region filter).
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create the context for one map surface and bind to it.
    ///
    /// Attaches the zoom listener, frames the initial view, and sets the
    /// layer visibilities for the mode implied by the initial zoom.
    pub fn initialize<S: MapSurface>(
        &self,
        surface: S,
        scope_key: impl Into<String>,
        center: GeoPoint,
        zoom: u8,
    ) -> SyncContext<S> {
        let mut ctx = SyncContext::new(surface, scope_key.into(), self.config.hybrid_threshold());
        ctx.mode = ZoomMode::for_zoom(zoom, ctx.threshold);
        self.rebind_listener(&mut ctx);
        ctx.surface.set_view(center, zoom);
        ctx.surface
            .set_layer_visible(MarkerLayer::Aggregate, ctx.mode == ZoomMode::Aggregate);
        ctx.surface
            .set_layer_visible(MarkerLayer::Detail, ctx.mode == ZoomMode::Detail);

        info!(scope = %ctx.scope_key(), %zoom, mode = %ctx.mode(), "Sync context initialized");
        ctx
    }

    /// Attach the zoom listener, detaching any previous one first.
    ///
    /// Safe to call on every host rebind; handlers never accumulate.
    pub fn rebind_listener<S: MapSurface>(&self, ctx: &mut SyncContext<S>) {
        if ctx.is_disposed() {
            return;
        }
        if let Some(token) = ctx.listener.take() {
            ctx.surface.detach_zoom_listener(token);
        }
        ctx.listener = Some(ctx.surface.attach_zoom_listener());
    }

    /// Apply a snapshot to the aggregate layer at the configured tolerance.
    ///
    /// Resolves coordinates, buckets into bundles, reconciles the marker
    /// set, and caches the snapshot for detail re-derivation. While the
    /// context is in detail mode, the detail layer is refreshed from the
    /// same snapshot in the same pass.
    pub fn sync_aggregate<S: MapSurface>(
        &self,
        ctx: &mut SyncContext<S>,
        snapshot: &Snapshot,
    ) -> SyncOutcome {
        self.sync_aggregate_inner(ctx, snapshot, self.config.tolerance_m(), None)
    }

    /// [`sync_aggregate`](Self::sync_aggregate) with an explicit tolerance.
    pub fn sync_aggregate_with_tolerance<S: MapSurface>(
        &self,
        ctx: &mut SyncContext<S>,
        snapshot: &Snapshot,
        tolerance_m: f64,
    ) -> SyncOutcome {
        self.sync_aggregate_inner(ctx, snapshot, tolerance_m, None)
    }

    /// Versioned aggregate sync: stale snapshots are discarded.
    ///
    /// A snapshot whose version is not strictly greater than the last
    /// applied one returns [`SyncOutcome::SkippedStale`] and changes
    /// nothing, so a late retry can never overwrite newer state.
    pub fn sync_aggregate_versioned<S: MapSurface>(
        &self,
        ctx: &mut SyncContext<S>,
        snapshot: &Snapshot,
        version: u64,
    ) -> SyncOutcome {
        self.sync_aggregate_inner(ctx, snapshot, self.config.tolerance_m(), Some(version))
    }

    fn sync_aggregate_inner<S: MapSurface>(
        &self,
        ctx: &mut SyncContext<S>,
        snapshot: &Snapshot,
        tolerance_m: f64,
        version: Option<u64>,
    ) -> SyncOutcome {
        if ctx.is_disposed() {
            debug!(scope = %ctx.scope_key(), "Sync on disposed context skipped");
            return SyncOutcome::SkippedDisposed;
        }
        if let Some(version) = version {
            if version <= ctx.last_version {
                debug!(
                    scope = %ctx.scope_key(),
                    version,
                    last = ctx.last_version,
                    "Stale snapshot discarded"
                );
                return SyncOutcome::SkippedStale;
            }
        }

        let (records, resolve) =
            tag_records(snapshot, self.config.aliases(), self.config.region());

        // Detail markers reuse the records resolved for this pass, so the
        // two layers can never disagree about a record's coordinates.
        let detail_set =
            (ctx.mode == ZoomMode::Detail).then(|| detail_bundles(&records));

        let mut bundles = bucket(records, tolerance_m);
        summarize_all(&mut bundles);

        let mut report = sync_layer(
            &mut ctx.surface,
            MarkerLayer::Aggregate,
            &mut ctx.aggregate,
            &bundles,
        );

        if let Some(detail_set) = detail_set {
            let detail_report = sync_layer(
                &mut ctx.surface,
                MarkerLayer::Detail,
                &mut ctx.detail,
                &detail_set,
            );
            report = combine(report, detail_report);
        }

        ctx.cached_snapshot = Some(snapshot.clone());
        ctx.last_version = version.unwrap_or(ctx.last_version + 1);

        SyncOutcome::Applied { report, resolve }
    }

    /// Explicitly refresh the detail layer from a snapshot.
    ///
    /// One marker per resolvable record, no bucketing. Also caches the
    /// snapshot, so a later mode switch re-derives from the same data.
    pub fn sync_detail<S: MapSurface>(
        &self,
        ctx: &mut SyncContext<S>,
        snapshot: &Snapshot,
    ) -> SyncOutcome {
        if ctx.is_disposed() {
            debug!(scope = %ctx.scope_key(), "Detail sync on disposed context skipped");
            return SyncOutcome::SkippedDisposed;
        }

        let (records, resolve) =
            tag_records(snapshot, self.config.aliases(), self.config.region());
        let detail_set = detail_bundles(&records);

        let report = sync_layer(
            &mut ctx.surface,
            MarkerLayer::Detail,
            &mut ctx.detail,
            &detail_set,
        );

        ctx.cached_snapshot = Some(snapshot.clone());
        SyncOutcome::Applied { report, resolve }
    }

    /// React to a viewport zoom change.
    ///
    /// Recomputes the mode; when it flips, swaps the visible layer.
    /// Entering detail derives per-record markers from the cached last
    /// snapshot (empty layer when nothing is cached); entering aggregate
    /// clears the detail layer and shows the bundles, which are already
    /// current from the last sync.
    pub fn handle_zoom_change<S: MapSurface>(&self, ctx: &mut SyncContext<S>, zoom: u8) {
        if ctx.is_disposed() {
            return;
        }
        let mode = ZoomMode::for_zoom(zoom, ctx.threshold);
        if mode == ctx.mode {
            return;
        }
        debug!(scope = %ctx.scope_key(), %zoom, from = %ctx.mode, to = %mode, "Zoom mode switch");
        ctx.mode = mode;

        match mode {
            ZoomMode::Detail => {
                ctx.surface.set_layer_visible(MarkerLayer::Aggregate, false);
                if let Some(snapshot) = ctx.cached_snapshot.clone() {
                    let (records, _) =
                        tag_records(&snapshot, self.config.aliases(), self.config.region());
                    let detail_set = detail_bundles(&records);
                    sync_layer(
                        &mut ctx.surface,
                        MarkerLayer::Detail,
                        &mut ctx.detail,
                        &detail_set,
                    );
                }
                ctx.surface.set_layer_visible(MarkerLayer::Detail, true);
            }
            ZoomMode::Aggregate => {
                clear_layer(&mut ctx.surface, &mut ctx.detail);
                ctx.surface.set_layer_visible(MarkerLayer::Detail, false);
                ctx.surface.set_layer_visible(MarkerLayer::Aggregate, true);
            }
        }
    }

    /// Change the hybrid zoom threshold for one context.
    ///
    /// Re-evaluates the mode at the surface's current zoom immediately.
    /// Returns `false` on a disposed context.
    pub fn set_hybrid_threshold<S: MapSurface>(
        &self,
        ctx: &mut SyncContext<S>,
        threshold: u8,
    ) -> bool {
        if ctx.is_disposed() {
            return false;
        }
        ctx.threshold = threshold;
        let zoom = ctx.surface.zoom();
        self.handle_zoom_change(ctx, zoom);
        true
    }

    /// Frame the viewport around the active layer's markers.
    ///
    /// Returns `true` when at least one marker was framed, `false` for
    /// the empty fallback or a disposed context.
    pub fn fit_view<S: MapSurface>(&self, ctx: &mut SyncContext<S>, padding_px: u32) -> bool {
        if ctx.is_disposed() {
            return false;
        }
        let positions = match ctx.mode {
            ZoomMode::Aggregate => ctx.aggregate.positions(),
            ZoomMode::Detail => ctx.detail.positions(),
        };
        viewport::fit(&mut ctx.surface, &positions, padding_px)
    }

    /// [`fit_view`](Self::fit_view) with the configured default padding.
    pub fn fit_view_default<S: MapSurface>(&self, ctx: &mut SyncContext<S>) -> bool {
        self.fit_view(ctx, self.config.fit_padding_px())
    }

    /// Tear down a context. Equivalent to [`SyncContext::dispose`].
    pub fn dispose<S: MapSurface>(&self, ctx: &mut SyncContext<S>) {
        ctx.dispose();
    }
}

/// One singleton bundle per record, keyed by kind and ordinal.
///
/// Ordinals count within each kind's input order, so identical snapshots
/// produce identical key sets and detail re-syncs diff to nothing.
fn detail_bundles(records: &[TaggedRecord]) -> HashMap<BundleKey, Bundle> {
    let mut out = HashMap::with_capacity(records.len());
    let mut ordinals = [0usize; 5];

    for record in records {
        let ordinal = ordinals[record.kind.index()];
        ordinals[record.kind.index()] += 1;

        let key = BundleKey::detail(record.kind, ordinal);
        let mut bundle = Bundle::new(key.clone(), record.point);
        bundle.push(record.clone());
        summarize(&mut bundle);
        out.insert(key, bundle);
    }

    out
}

fn combine(a: SyncReport, b: SyncReport) -> SyncReport {
    SyncReport {
        created: a.created + b.created,
        updated: a.updated + b.updated,
        removed: a.removed + b.removed,
        unchanged: a.unchanged + b.unchanged,
        failed: a.failed + b.failed,
    }
}
