//! Viewport fitting
//!
//! Computes a bounding region over the currently active markers and asks
//! the map collaborator to frame it, with defined fallbacks for zero and
//! one points.

use tracing::debug;

use crate::coord::{GeoBounds, GeoPoint};
use crate::surface::MapSurface;

/// Fallback view when no markers are live.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };
pub const DEFAULT_ZOOM: u8 = 2;

/// Zoom used when centering on a single marker.
pub const CLOSE_ZOOM: u8 = 16;

/// Fit never zooms in past this level, however tight the bounds.
pub const MAX_FIT_ZOOM: u8 = 17;

/// Frame the viewport around the given marker positions.
///
/// - No valid positions: reset to the default center and zoom, return
///   `false`.
/// - One position: center on it at [`CLOSE_ZOOM`], return `true`.
/// - Several: fit the padded bounding rectangle, clamped to
///   [`MAX_FIT_ZOOM`], return `true`.
///
/// Positions with non-finite coordinates are filtered out first; they
/// should not occur, but a bad collaborator echo must not poison the fit.
pub fn fit<S: MapSurface>(surface: &mut S, positions: &[GeoPoint], padding_px: u32) -> bool {
    let mut valid = positions
        .iter()
        .filter(|p| p.lat.is_finite() && p.lon.is_finite());

    let first = match valid.next() {
        Some(first) => *first,
        None => {
            debug!("No live markers; resetting to default view");
            surface.set_view(DEFAULT_CENTER, DEFAULT_ZOOM);
            return false;
        }
    };

    let mut bounds = GeoBounds::from_point(first);
    let mut count = 1;
    for point in valid {
        bounds.expand(*point);
        count += 1;
    }

    if count == 1 {
        surface.set_view(first, CLOSE_ZOOM);
    } else {
        surface.fit_bounds(&bounds, padding_px, MAX_FIT_ZOOM);
    }
    true
}
