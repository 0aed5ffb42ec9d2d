//! Hybrid zoom mode
//!
//! A two-state view switch driven by viewport zoom: below the threshold
//! the aggregate bundle layer shows; at or above it, one marker per
//! record. The mode is a pure function of zoom and threshold, so repeated
//! events with the same zoom are harmless.
//!
//! No hysteresis band is applied: rapid dithering across the threshold
//! toggles modes on every crossing. Known limitation.

/// Which marker rendering is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomMode {
    /// Bundled markers, one per spatial grid cell. Initial mode.
    Aggregate,
    /// One marker per record.
    Detail,
}

impl ZoomMode {
    /// Mode for a zoom level against a threshold.
    ///
    /// The comparison is `>=`: a zoom exactly equal to the threshold
    /// resolves to `Detail`.
    #[inline]
    pub fn for_zoom(zoom: u8, threshold: u8) -> Self {
        if zoom >= threshold {
            ZoomMode::Detail
        } else {
            ZoomMode::Aggregate
        }
    }
}

impl std::fmt::Display for ZoomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoomMode::Aggregate => f.write_str("aggregate"),
            ZoomMode::Detail => f.write_str("detail"),
        }
    }
}
