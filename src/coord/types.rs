//! Geographic type definitions

use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range, half-open at the antimeridian
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Longitudes within this distance of ±180° are rejected outright.
///
/// A point sitting exactly on the antimeridian makes every bounding box
/// that includes it ambiguous (wrap east or wrap west), so the resolver
/// filters such points instead of guessing.
pub const ANTIMERIDIAN_EPSILON: f64 = 1e-9;

/// A validated geographic point.
///
/// Created only through [`GeoPoint::checked`] by the coordinate resolver;
/// immutable once produced. Latitude is in degrees north, longitude in
/// degrees east within `(-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees, normalized to (-180, 180]
    pub lon: f64,
}

impl GeoPoint {
    /// Validate a latitude/longitude pair into a `GeoPoint`.
    ///
    /// The longitude is expected to be already normalized (see
    /// [`normalize_lon`](crate::coord::normalize_lon)); this constructor
    /// only checks ranges, finiteness, and the antimeridian exclusion.
    ///
    /// # Errors
    ///
    /// Returns a [`CoordError`] describing the first failed check.
    pub fn checked(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordError::NonFinite);
        }
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        if (lon.abs() - 180.0).abs() < ANTIMERIDIAN_EPSILON {
            return Err(CoordError::Antimeridian(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A rectangular region filter in geographic coordinates.
///
/// Points outside the region are treated as resolution failures, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Region {
    /// Create a region from its southwest and northeast corners.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Check whether a point lies inside the region (inclusive edges).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }

    /// A region is well-formed when each minimum does not exceed its maximum.
    pub fn is_well_formed(&self) -> bool {
        self.min_lat <= self.max_lat && self.min_lon <= self.max_lon
    }
}

/// A running geographic bounding box.
///
/// Built by seeding with one point and expanding with the rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Seed a bounding box from a single point.
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            min_lat: point.lat,
            max_lat: point.lat,
            min_lon: point.lon,
            max_lon: point.lon,
        }
    }

    /// Expand the box to include another point.
    pub fn expand(&mut self, point: GeoPoint) {
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_lon = self.min_lon.min(point.lon);
        self.max_lon = self.max_lon.max(point.lon);
    }

    /// Geometric center of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }

    /// Latitude and longitude spans in degrees.
    pub fn span(&self) -> (f64, f64) {
        (self.max_lat - self.min_lat, self.max_lon - self.min_lon)
    }
}

/// Errors that can occur during coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside valid range (-90 to 90)
    #[error("Invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),

    /// Longitude is outside valid range after normalization
    #[error("Invalid longitude: {0} (must be within ({MIN_LON}, {MAX_LON}])")]
    InvalidLongitude(f64),

    /// Longitude sits on the antimeridian, which makes bounding boxes ambiguous
    #[error("Longitude {0} lies on the antimeridian")]
    Antimeridian(f64),

    /// Latitude or longitude is NaN or infinite
    #[error("Coordinate is not a finite number")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_valid_point() {
        let point = GeoPoint::checked(40.7128, -74.0060).unwrap();
        assert_eq!(point.lat, 40.7128);
        assert_eq!(point.lon, -74.0060);
    }

    #[test]
    fn test_checked_rejects_out_of_range_latitude() {
        let result = GeoPoint::checked(91.0, 0.0);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));

        let result = GeoPoint::checked(1000.0, 0.0);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_checked_rejects_non_finite() {
        assert!(matches!(
            GeoPoint::checked(f64::NAN, 0.0),
            Err(CoordError::NonFinite)
        ));
        assert!(matches!(
            GeoPoint::checked(0.0, f64::INFINITY),
            Err(CoordError::NonFinite)
        ));
    }

    #[test]
    fn test_checked_rejects_antimeridian() {
        assert!(matches!(
            GeoPoint::checked(0.0, 180.0),
            Err(CoordError::Antimeridian(_))
        ));
        assert!(matches!(
            GeoPoint::checked(0.0, -180.0),
            Err(CoordError::InvalidLongitude(_)) | Err(CoordError::Antimeridian(_))
        ));
    }

    #[test]
    fn test_region_contains() {
        let region = Region::new(40.0, -75.0, 41.0, -73.0);
        let inside = GeoPoint::checked(40.7, -74.0).unwrap();
        let outside = GeoPoint::checked(42.0, -74.0).unwrap();

        assert!(region.contains(&inside));
        assert!(!region.contains(&outside));
        assert!(region.is_well_formed());
    }

    #[test]
    fn test_region_edges_are_inclusive() {
        let region = Region::new(40.0, -75.0, 41.0, -73.0);
        let on_edge = GeoPoint::checked(40.0, -75.0).unwrap();
        assert!(region.contains(&on_edge));
    }

    #[test]
    fn test_bounds_expand_encompasses_points() {
        let a = GeoPoint::checked(40.0, -74.0).unwrap();
        let b = GeoPoint::checked(41.0, -73.0).unwrap();
        let c = GeoPoint::checked(39.5, -74.5).unwrap();

        let mut bounds = GeoBounds::from_point(a);
        bounds.expand(b);
        bounds.expand(c);

        assert_eq!(bounds.min_lat, 39.5);
        assert_eq!(bounds.max_lat, 41.0);
        assert_eq!(bounds.min_lon, -74.5);
        assert_eq!(bounds.max_lon, -73.0);

        let center = bounds.center();
        assert!((center.lat - 40.25).abs() < 1e-9);
        assert!((center.lon - (-73.75)).abs() < 1e-9);
    }
}
