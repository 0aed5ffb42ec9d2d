//! Spatial bucketing engine
//!
//! Groups resolved points into fixed-size grid cells ("bundles") for a
//! given tolerance distance, then enriches each bundle with summary data.
//! Bucketing is O(n) in record count and deterministic: membership depends
//! only on the grid cell a point falls in, never on visitation order.
//!
//! # Usage
//!
//! ```
//! use cartomark::bundle::{bucket, summarize_all};
//! # use cartomark::record::{tag_records, AliasTable, Snapshot};
//! # let snapshot = Snapshot::default();
//! let (records, _) = tag_records(&snapshot, &AliasTable::default(), None);
//! let mut bundles = bucket(records, 80.0);
//! summarize_all(&mut bundles);
//! ```

pub mod grid;
mod summary;
mod types;

pub use summary::{summarize, summarize_all};
pub use types::{Bundle, BundleKey};

use std::collections::HashMap;

use crate::record::TaggedRecord;

/// Group tagged records into grid-cell bundles.
///
/// Each record is assigned to the cell containing its point at the given
/// tolerance. The anchor of a new bundle is the point of whichever record
/// reaches the cell first in iteration order; callers must not depend on
/// which kind wins the anchor.
///
/// Summary fields are left at their defaults; run
/// [`summarize_all`] afterwards.
pub fn bucket(records: Vec<TaggedRecord>, tolerance_m: f64) -> HashMap<BundleKey, Bundle> {
    let mut bundles: HashMap<BundleKey, Bundle> = HashMap::new();

    for record in records {
        let key = grid::cell_key(record.point, tolerance_m);
        bundles
            .entry(key.clone())
            .or_insert_with(|| Bundle::new(key, record.point))
            .push(record);
    }

    bundles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;
    use crate::record::RecordKind;
    use serde_json::json;

    fn record(kind: RecordKind, lat: f64, lon: f64) -> TaggedRecord {
        TaggedRecord {
            kind,
            point: GeoPoint::checked(lat, lon).unwrap(),
            payload: json!({}),
            timestamp: None,
            severity: None,
        }
    }

    #[test]
    fn test_two_nearby_crowd_reports_share_a_bundle() {
        // ~28 m apart, well inside an 80 m tolerance cell.
        let records = vec![
            record(RecordKind::Crowd, 0.0001, 10.00010),
            record(RecordKind::Crowd, 0.0001, 10.00035),
        ];

        let bundles = bucket(records, 80.0);

        assert_eq!(bundles.len(), 1, "Nearby reports should share one bundle");
        let bundle = bundles.values().next().unwrap();
        assert_eq!(bundle.members_of(RecordKind::Crowd).len(), 2);
    }

    #[test]
    fn test_every_record_lands_in_exactly_one_bundle() {
        let records = vec![
            record(RecordKind::Event, 0.0001, 10.0001),
            record(RecordKind::Place, 0.0001, 10.0002),
            record(RecordKind::Crowd, 10.0, 20.0),
            record(RecordKind::Traffic, -30.0, 150.0),
            record(RecordKind::Annotation, 60.0, -45.0),
        ];
        let total = records.len();

        let bundles = bucket(records, 80.0);

        let member_total: usize = bundles.values().map(|b| b.iter_members().count()).sum();
        assert_eq!(member_total, total, "Partition must not drop or duplicate");
    }

    #[test]
    fn test_membership_is_order_independent() {
        let forward = vec![
            record(RecordKind::Event, 0.0001, 10.0001),
            record(RecordKind::Crowd, 0.0001, 10.0002),
            record(RecordKind::Place, 10.0, 20.0),
            record(RecordKind::Traffic, 10.00001, 20.00001),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = bucket(forward, 80.0);
        let b = bucket(reversed, 80.0);

        assert_eq!(a.len(), b.len());
        for (key, bundle) in &a {
            let other = b.get(key).expect("Same keys regardless of order");
            for kind in RecordKind::ALL {
                assert_eq!(
                    bundle.members_of(kind).len(),
                    other.members_of(kind).len(),
                    "Membership counts must match for {}",
                    kind
                );
            }
        }
    }

    #[test]
    fn test_monotonic_coarsening() {
        // Fixed latitude: every point sees the same cell extent, so cells
        // nest exactly across the 4x tolerance steps.
        let records: Vec<_> = (0..50)
            .map(|i| record(RecordKind::Place, 0.0, 10.0 + 0.001 * i as f64))
            .collect();

        let mut previous = usize::MAX;
        for tolerance in [20.0, 80.0, 320.0, 1280.0, 5120.0] {
            let count = bucket(records.clone(), tolerance).len();
            assert!(
                count <= previous,
                "Increasing tolerance from produced more bundles: {} > {}",
                count,
                previous
            );
            previous = count;
        }
    }

    #[test]
    fn test_anchor_is_first_record_in_cell() {
        let records = vec![
            record(RecordKind::Event, 0.0001, 10.00010),
            record(RecordKind::Crowd, 0.0001, 10.00035),
        ];
        let first_point = records[0].point;

        let bundles = bucket(records, 80.0);
        let bundle = bundles.values().next().unwrap();
        assert_eq!(bundle.anchor, first_point);
    }
}
