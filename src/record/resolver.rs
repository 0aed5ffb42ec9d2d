//! Coordinate resolver: raw records in, validated tagged records out.
//!
//! Extracts a geographic point from an arbitrarily-shaped record using the
//! kind's declared alias table, normalizes the longitude, validates ranges,
//! and optionally applies a rectangular region filter. Failure is silent
//! filtering: a malformed record never aborts processing of its batch.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::trace;

use crate::coord::{normalize_lon, GeoPoint, Region};

use super::{AliasTable, KindAliases, RecordKind, Snapshot, TaggedRecord};

/// Per-kind counts of records skipped by the resolver.
///
/// Purely diagnostic; the host can surface these or ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    pub skipped: [usize; 5],
}

impl ResolveStats {
    /// Number of records of one kind that failed resolution.
    pub fn skipped_of(&self, kind: RecordKind) -> usize {
        self.skipped[kind.index()]
    }

    /// Total skipped across all kinds.
    pub fn total_skipped(&self) -> usize {
        self.skipped.iter().sum()
    }
}

/// Walk a dotted field path through a JSON object.
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Interpret a JSON value as a finite float.
///
/// Accepts JSON numbers and numeric strings; rejects everything else,
/// including NaN and infinities.
fn as_finite_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Try alias paths in declared order, returning the first parseable value.
fn first_numeric(record: &Value, paths: &[String]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(as_finite_f64))
}

/// Resolve a geographic point from a raw record.
///
/// Tries the latitude and longitude alias paths in declared order, takes
/// the first parseable numeric pair, normalizes the longitude into
/// `(-180, 180]`, and validates ranges. If a region filter is given,
/// points outside it are resolution failures too.
///
/// # Returns
///
/// `Some(GeoPoint)` for a usable coordinate, `None` for anything else.
/// Never panics, never returns an error.
pub fn resolve(record: &Value, aliases: &KindAliases, region: Option<&Region>) -> Option<GeoPoint> {
    let lat = first_numeric(record, &aliases.lat)?;
    let lon = normalize_lon(first_numeric(record, &aliases.lon)?);

    let point = match GeoPoint::checked(lat, lon) {
        Ok(point) => point,
        Err(err) => {
            trace!(%lat, %lon, %err, "Record coordinate rejected");
            return None;
        }
    };

    if let Some(region) = region {
        if !region.contains(&point) {
            trace!(%point, "Record outside configured region");
            return None;
        }
    }

    Some(point)
}

/// Parse a timestamp field: RFC 3339 strings or unix epoch seconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let secs = n.as_i64()?;
            Utc.timestamp_opt(secs, 0).single()
        }
        _ => None,
    }
}

fn first_timestamp(record: &Value, paths: &[String]) -> Option<DateTime<Utc>> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(parse_timestamp))
}

fn first_severity(record: &Value, paths: &[String]) -> Option<i32> {
    paths.iter().find_map(|path| {
        lookup(record, path)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    })
}

/// Run the resolver across a whole snapshot, producing tagged records.
///
/// Records that fail resolution are counted per kind and otherwise
/// silently dropped. Output order follows input order within each kind,
/// and kinds are visited in declaration order.
pub fn tag_records(
    snapshot: &Snapshot,
    table: &AliasTable,
    region: Option<&Region>,
) -> (Vec<TaggedRecord>, ResolveStats) {
    let mut tagged = Vec::with_capacity(snapshot.len());
    let mut stats = ResolveStats::default();

    for kind in RecordKind::ALL {
        let aliases = table.for_kind(kind);
        for raw in snapshot.records_of(kind) {
            match resolve(raw, aliases, region) {
                Some(point) => {
                    tagged.push(TaggedRecord {
                        kind,
                        point,
                        payload: raw.clone(),
                        timestamp: first_timestamp(raw, &aliases.timestamp),
                        severity: first_severity(raw, &aliases.severity),
                    });
                    stats.resolved += 1;
                }
                None => stats.skipped[kind.index()] += 1,
            }
        }
    }

    (tagged, stats)
}
