//! Bundle and bundle-key types.

use crate::coord::GeoPoint;
use crate::record::{RecordKind, TaggedRecord};

/// Stable identity of a spatial bundle.
///
/// Derived from grid-cell coordinates (aggregate mode) or from a record's
/// kind and ordinal (detail mode). Only equality and hashing matter; there
/// is no meaningful ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleKey(String);

impl BundleKey {
    /// Key for a grid cell.
    pub fn cell(lat_cell: i64, lon_cell: i64) -> Self {
        Self(format!("{}:{}", lat_cell, lon_cell))
    }

    /// Key for a single-record detail marker.
    ///
    /// The ordinal is the record's position within its kind's input array,
    /// which keeps keys stable across identical snapshots.
    pub fn detail(kind: RecordKind, ordinal: usize) -> Self {
        Self(format!("{}:{}", kind.as_str(), ordinal))
    }
}

impl std::fmt::Display for BundleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An aggregated group of geotagged records sharing one spatial grid cell.
///
/// Rendered as a single marker in aggregate mode. Summary fields
/// (`total_count`, `max_severity`, latest picks) are filled in by
/// [`summarize`](crate::bundle::summarize) after bucketing.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub key: BundleKey,
    /// Position of whichever record reached the cell first.
    pub anchor: GeoPoint,
    members: [Vec<TaggedRecord>; 5],
    pub total_count: usize,
    /// Maximum member severity; absent severities count as 0.
    pub max_severity: i32,
    latest: [Option<usize>; 5],
}

impl Bundle {
    /// Create an empty bundle anchored at the given point.
    pub fn new(key: BundleKey, anchor: GeoPoint) -> Self {
        Self {
            key,
            anchor,
            members: Default::default(),
            total_count: 0,
            max_severity: 0,
            latest: [None; 5],
        }
    }

    /// Append a member record. Summary fields are not updated here.
    pub fn push(&mut self, record: TaggedRecord) {
        self.members[record.kind.index()].push(record);
    }

    /// Members of one kind, in input order.
    pub fn members_of(&self, kind: RecordKind) -> &[TaggedRecord] {
        &self.members[kind.index()]
    }

    /// All members across kinds, kinds in declaration order.
    pub fn iter_members(&self) -> impl Iterator<Item = &TaggedRecord> {
        self.members.iter().flatten()
    }

    /// The member of one kind with the greatest timestamp, if any.
    ///
    /// Populated by `summarize`; `None` before that, or when the kind has
    /// no members with usable timestamps and no members at all.
    pub fn latest_of(&self, kind: RecordKind) -> Option<&TaggedRecord> {
        self.latest[kind.index()].map(|i| &self.members[kind.index()][i])
    }

    pub(crate) fn set_latest(&mut self, kind: RecordKind, index: Option<usize>) {
        self.latest[kind.index()] = index;
    }
}
