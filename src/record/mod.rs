//! Record kinds, raw snapshot payloads, and the canonical tagged form.
//!
//! The data source delivers a payload object with five arrays of arbitrary
//! records; everything downstream of the coordinate resolver works on the
//! canonical [`TaggedRecord`] instead. Tagged records live for one sync
//! cycle and are discarded after bundling.

mod aliases;
mod resolver;

pub use aliases::{AliasTable, KindAliases};
pub use resolver::{resolve, tag_records, ResolveStats};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::coord::GeoPoint;

/// The five record kinds the engine ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Scheduled happenings
    Event,
    /// Points of interest
    Place,
    /// Crowd-density reports
    Crowd,
    /// Traffic incidents
    Traffic,
    /// Free-form contextual annotations
    Annotation,
}

impl RecordKind {
    /// All kinds, in declaration order.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Event,
        RecordKind::Place,
        RecordKind::Crowd,
        RecordKind::Traffic,
        RecordKind::Annotation,
    ];

    /// Stable index for per-kind arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            RecordKind::Event => 0,
            RecordKind::Place => 1,
            RecordKind::Crowd => 2,
            RecordKind::Traffic => 3,
            RecordKind::Annotation => 4,
        }
    }

    /// Short lowercase name, used in detail marker keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Event => "event",
            RecordKind::Place => "place",
            RecordKind::Crowd => "crowd",
            RecordKind::Traffic => "traffic",
            RecordKind::Annotation => "annotation",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw data snapshot as delivered by the data source.
///
/// Absent arrays are treated as empty; no schema versioning is assumed.
/// Individual elements stay opaque (`serde_json::Value`) until the
/// coordinate resolver has produced tagged records from them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub places: Vec<serde_json::Value>,
    #[serde(default)]
    pub crowds: Vec<serde_json::Value>,
    #[serde(default)]
    pub traffic: Vec<serde_json::Value>,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

impl Snapshot {
    /// Deserialize a snapshot from a raw JSON value.
    ///
    /// Unknown fields are ignored; missing arrays default to empty.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The raw records of one kind.
    pub fn records_of(&self, kind: RecordKind) -> &[serde_json::Value] {
        match kind {
            RecordKind::Event => &self.events,
            RecordKind::Place => &self.places,
            RecordKind::Crowd => &self.crowds,
            RecordKind::Traffic => &self.traffic,
            RecordKind::Annotation => &self.annotations,
        }
    }

    /// Total number of raw records across all kinds.
    pub fn len(&self) -> usize {
        RecordKind::ALL
            .iter()
            .map(|k| self.records_of(*k).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The canonical normalized form of one raw input item.
///
/// Created per sync cycle by the coordinate resolver, discarded after
/// bundling. The original record is carried along as an opaque payload so
/// display building can pull titles and descriptions from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRecord {
    pub kind: RecordKind,
    pub point: GeoPoint,
    pub payload: serde_json::Value,
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: Option<i32>,
}
