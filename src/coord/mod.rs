//! Coordinate primitives and normalization
//!
//! Provides the validated [`GeoPoint`] type, bounding-box and region helpers,
//! and longitude normalization for the wildly inconsistent coordinate
//! encodings that arrive in raw snapshots (0–360 ranges, multiple
//! wrap-arounds, string-encoded numbers handled upstream by the resolver).

mod types;

pub use types::{
    CoordError, GeoBounds, GeoPoint, Region, ANTIMERIDIAN_EPSILON, MAX_LAT, MAX_LON, MIN_LAT,
    MIN_LON,
};

/// Normalizes a longitude into the `(-180, 180]` range.
///
/// A value in `(180, 360]` gets a single 360 subtraction (the common
/// 0–360 encoding); anything else is wrapped by repeated ±360 shifts.
/// Non-finite input is returned unchanged; the caller rejects it when
/// constructing a [`GeoPoint`].
///
/// # Examples
///
/// ```
/// use cartomark::coord::normalize_lon;
///
/// assert_eq!(normalize_lon(370.0), 10.0);
/// assert_eq!(normalize_lon(190.0), -170.0);
/// assert_eq!(normalize_lon(-170.0), -170.0);
/// ```
#[inline]
pub fn normalize_lon(lon: f64) -> f64 {
    if !lon.is_finite() {
        return lon;
    }
    let mut lon = lon;
    if lon > 180.0 && lon <= 360.0 {
        lon -= 360.0;
    } else {
        while lon > 180.0 {
            lon -= 360.0;
        }
        while lon <= -180.0 {
            lon += 360.0;
        }
    }
    lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_370_to_10() {
        assert!((normalize_lon(370.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_190_to_minus_170() {
        assert!((normalize_lon(190.0) - (-170.0)).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_near_360_wraps_to_near_zero() {
        let lon = normalize_lon(359.9999);
        assert!(
            (lon - (-0.0001)).abs() < 1e-9,
            "359.9999 should normalize to about -0.0001, got {}",
            lon
        );
    }

    #[test]
    fn test_normalize_leaves_in_range_values_alone() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(179.9), 179.9);
        assert_eq!(normalize_lon(-179.9), -179.9);
        assert_eq!(normalize_lon(180.0), 180.0);
    }

    #[test]
    fn test_normalize_multiple_wraps() {
        assert!((normalize_lon(730.0) - 10.0).abs() < 1e-12);
        assert!((normalize_lon(-550.0) - 170.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_exact_negative_180_wraps_to_positive() {
        // -180 is outside the half-open range; it wraps to +180, which the
        // GeoPoint constructor then rejects as antimeridian.
        assert_eq!(normalize_lon(-180.0), 180.0);
    }

    #[test]
    fn test_normalize_passes_non_finite_through() {
        assert!(normalize_lon(f64::NAN).is_nan());
        assert!(normalize_lon(f64::INFINITY).is_infinite());
    }
}
