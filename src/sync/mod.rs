//! Marker lifecycle synchronization
//!
//! The stateful heart of the engine: a registry of live markers per layer,
//! and a diffing pass that reconciles it against each newly computed
//! bundle set with minimal churn.

mod display;
mod registry;
mod synchronizer;

pub use display::display_payload;
pub use registry::{MarkerRegistry, RegisteredMarker};
pub use synchronizer::{clear_layer, sync_layer, SyncReport};
