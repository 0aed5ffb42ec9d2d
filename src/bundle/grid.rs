//! Grid-cell sizing and key derivation.
//!
//! A tolerance distance in meters is converted to a per-point cell extent
//! in degrees, and each point is assigned to the grid cell containing it.
//! Two points land in the same bundle iff they fall in the same cell,
//! independent of visitation order, at O(n) total cost.

use crate::coord::GeoPoint;

use super::BundleKey;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Floor applied to cos(lat) so cell width stays bounded near the poles.
pub const MIN_COS_LAT: f64 = 0.1;

/// Grid cell extent in degrees at a given latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellExtent {
    pub d_lat: f64,
    pub d_lon: f64,
}

/// Convert a tolerance in meters to a cell extent at the given latitude.
///
/// Longitude degrees shrink with cos(latitude); the [`MIN_COS_LAT`] floor
/// keeps the cell width from exploding near the poles.
#[inline]
pub fn cell_extent(tolerance_m: f64, lat: f64) -> CellExtent {
    let d_lat = tolerance_m / METERS_PER_DEGREE;
    let d_lon = tolerance_m / (METERS_PER_DEGREE * lat.to_radians().cos().max(MIN_COS_LAT));
    CellExtent { d_lat, d_lon }
}

/// Grid-cell key for a point at the given tolerance.
#[inline]
pub fn cell_key(point: GeoPoint, tolerance_m: f64) -> BundleKey {
    let extent = cell_extent(tolerance_m, point.lat);
    let lat_cell = (point.lat / extent.d_lat).floor() as i64;
    let lon_cell = (point.lon / extent.d_lon).floor() as i64;
    BundleKey::cell(lat_cell, lon_cell)
}
