//! Map surface collaborator boundary.
//!
//! The engine never draws anything itself: every visual effect goes
//! through the [`MapSurface`] trait, implemented by the host against its
//! map rendering library. Tests implement it with recording mocks.

use thiserror::Error;

use crate::coord::{GeoBounds, GeoPoint};
use crate::record::RecordKind;

/// Opaque reference to a live marker, issued by the map surface.
///
/// Owned exclusively by the synchronizer's registry; at most one handle
/// exists per bundle key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Token for an attached zoom listener, used for clean detachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

impl ListenerToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// The two marker layers the engine maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerLayer {
    /// One marker per bundle
    Aggregate,
    /// One marker per record
    Detail,
}

/// Display data for one marker, derived from a bundle summary.
///
/// Pure data: the host decides how to style it. The icon kind is the kind
/// with the most members in the bundle, ties broken by kind declaration
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload {
    /// Kind whose icon represents the marker.
    pub icon: RecordKind,
    /// Number of member records, shown as a badge when greater than 1.
    pub badge_count: usize,
    /// Maximum member severity (absent severities count as 0).
    pub max_severity: i32,
    /// Popup content, one line per kind with members.
    pub popup_lines: Vec<String>,
}

/// Errors a map surface call can fail with.
///
/// These are caught per marker inside the synchronizer; one bad marker
/// never aborts the rest of a sync pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The surface is not ready to accept commands yet
    #[error("Map surface not ready")]
    NotReady,

    /// The handle does not refer to a live marker
    #[error("Unknown marker handle: {0}")]
    UnknownHandle(u64),

    /// Failure reported by the underlying map library
    #[error("Map backend error: {0}")]
    Backend(String),
}

/// Commands the engine issues to its map collaborator.
///
/// Zoom *events* travel the other way: the host observes the map's zoom
/// changes and calls `MarkerEngine::handle_zoom_change`. The listener
/// token pair exists so attachment is idempotent and detachment on
/// disposal is explicit.
pub trait MapSurface {
    /// Create a marker on a layer. Returns the handle owning its identity.
    fn create_marker(
        &mut self,
        layer: MarkerLayer,
        point: GeoPoint,
        payload: &DisplayPayload,
    ) -> Result<MarkerHandle, SurfaceError>;

    /// Update a live marker in place: reposition and refresh display data.
    fn update_marker(
        &mut self,
        handle: MarkerHandle,
        point: GeoPoint,
        payload: &DisplayPayload,
    ) -> Result<(), SurfaceError>;

    /// Remove a live marker. The handle is dead afterwards.
    fn remove_marker(&mut self, handle: MarkerHandle) -> Result<(), SurfaceError>;

    /// Show or hide a whole marker layer.
    fn set_layer_visible(&mut self, layer: MarkerLayer, visible: bool);

    /// Current viewport zoom level.
    fn zoom(&self) -> u8;

    /// Register interest in zoom changes; returns a token for detachment.
    fn attach_zoom_listener(&mut self) -> ListenerToken;

    /// Deregister a previously attached zoom listener.
    fn detach_zoom_listener(&mut self, token: ListenerToken);

    /// Animate the viewport to frame the given bounds.
    fn fit_bounds(&mut self, bounds: &GeoBounds, padding_px: u32, max_zoom: u8);

    /// Jump the viewport to a center and zoom.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);
}
