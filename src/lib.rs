//! Cartomark - Geospatial aggregation and marker synchronization
//!
//! This library ingests heterogeneous, frequently-refreshed geotagged records
//! and maintains a stable, flicker-free marker set on an interactive map,
//! switching between an aggregated view (spatial bundles) and a detailed view
//! (one marker per record) as the viewer zooms.
//!
//! # High-Level API
//!
//! The [`engine`] module provides the boundary facade:
//!
//! ```
//! use cartomark::engine::{EngineConfig, MarkerEngine};
//!
//! let engine = MarkerEngine::new(EngineConfig::default()).unwrap();
//! // let mut ctx = engine.initialize(surface, "main-map", center, 12);
//! // engine.sync_aggregate(&mut ctx, &snapshot);
//! ```
//!
//! The map rendering library and the host UI framework stay behind the
//! [`surface::MapSurface`] trait; this crate never draws anything itself.

pub mod bundle;
pub mod context;
pub mod coord;
pub mod engine;
pub mod logging;
pub mod record;
pub mod surface;
pub mod sync;
pub mod viewport;
pub mod zoom;

/// Version of the cartomark library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
