//! Bundle summary builder.
//!
//! Computes per-bundle counts, severities, and "latest" picks from member
//! records after bucketing has filled the membership lists.

use std::collections::HashMap;

use super::{Bundle, BundleKey};
use crate::record::RecordKind;

/// Fill in a bundle's summary fields from its members.
///
/// - `total_count` is the sum of member-list lengths across kinds.
/// - `max_severity` is the maximum member severity, absent severities
///   counting as 0 (an empty bundle also summarizes to 0).
/// - The latest pick per kind is the member with the greatest timestamp;
///   ties, and members without timestamps when no member has one, fall to
///   the last one seen in input order.
pub fn summarize(bundle: &mut Bundle) {
    let mut total = 0;
    let mut max_severity = 0;

    for kind in RecordKind::ALL {
        let members = bundle.members_of(kind);
        total += members.len();

        let mut latest: Option<usize> = None;
        for (i, member) in members.iter().enumerate() {
            max_severity = max_severity.max(member.severity.unwrap_or(0));
            latest = match (latest, member.timestamp) {
                (None, _) => Some(i),
                (Some(best), Some(ts)) => {
                    let best_ts = members[best].timestamp;
                    // >= keeps the last-seen member on equal timestamps;
                    // an untimestamped best always yields to a timestamped one.
                    if best_ts.map_or(true, |best| ts >= best) {
                        Some(i)
                    } else {
                        Some(best)
                    }
                }
                (Some(best), None) => {
                    if members[best].timestamp.is_none() {
                        Some(i)
                    } else {
                        Some(best)
                    }
                }
            };
        }
        bundle.set_latest(kind, latest);
    }

    bundle.total_count = total;
    bundle.max_severity = max_severity;
}

/// Summarize every bundle in a bucketed map.
pub fn summarize_all(bundles: &mut HashMap<BundleKey, Bundle>) {
    for bundle in bundles.values_mut() {
        summarize(bundle);
    }
}
