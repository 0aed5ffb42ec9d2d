//! Engine configuration.

use crate::coord::Region;
use crate::record::AliasTable;

use super::EngineError;

/// Default bucketing tolerance in meters.
pub const DEFAULT_TOLERANCE_M: f64 = 80.0;

/// Default hybrid zoom threshold.
pub const DEFAULT_HYBRID_THRESHOLD: u8 = 15;

/// Default viewport fit padding in pixels.
pub const DEFAULT_FIT_PADDING_PX: u32 = 24;

/// Configuration for a [`MarkerEngine`](super::MarkerEngine).
///
/// Groups bucketing, zoom, fitting, and resolution parameters, providing
/// sensible defaults while allowing customization.
///
/// # Example
///
/// ```
/// use cartomark::coord::Region;
/// use cartomark::engine::EngineConfig;
///
/// // Using defaults
/// let config = EngineConfig::default();
/// assert_eq!(config.tolerance_m(), 80.0);
///
/// // Custom configuration
/// let config = EngineConfig::new()
///     .with_tolerance_m(120.0)
///     .with_hybrid_threshold(13)
///     .with_region(Region::new(40.0, -75.0, 41.0, -73.0));
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    tolerance_m: f64,
    hybrid_threshold: u8,
    fit_padding_px: u32,
    region: Option<Region>,
    aliases: AliasTable,
}

impl EngineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bucketing tolerance in meters.
    ///
    /// The target spatial radius used to size grid cells; records within
    /// one cell share a bundle. Default: 80 meters.
    pub fn with_tolerance_m(mut self, tolerance_m: f64) -> Self {
        self.tolerance_m = tolerance_m;
        self
    }

    /// Set the hybrid zoom threshold.
    ///
    /// At or above this zoom the detail layer shows; below it, bundles.
    /// Default: 15.
    pub fn with_hybrid_threshold(mut self, threshold: u8) -> Self {
        self.hybrid_threshold = threshold;
        self
    }

    /// Set the viewport fit padding in pixels. Default: 24.
    pub fn with_fit_padding_px(mut self, padding_px: u32) -> Self {
        self.fit_padding_px = padding_px;
        self
    }

    /// Restrict resolution to a rectangular region.
    ///
    /// Points outside the region are silently filtered. Default: none.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Replace the field alias table used by the coordinate resolver.
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Check the configuration for values the engine cannot work with.
    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if !self.tolerance_m.is_finite() || self.tolerance_m <= 0.0 {
            return Err(EngineError::InvalidTolerance(self.tolerance_m));
        }
        if let Some(region) = &self.region {
            if !region.is_well_formed() {
                return Err(EngineError::MalformedRegion);
            }
        }
        Ok(())
    }

    pub fn tolerance_m(&self) -> f64 {
        self.tolerance_m
    }

    pub fn hybrid_threshold(&self) -> u8 {
        self.hybrid_threshold
    }

    pub fn fit_padding_px(&self) -> u32 {
        self.fit_padding_px
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
            hybrid_threshold: DEFAULT_HYBRID_THRESHOLD,
            fit_padding_px: DEFAULT_FIT_PADDING_PX,
            region: None,
            aliases: AliasTable::default(),
        }
    }
}
