//! Declared field-alias tables for coordinate resolution.
//!
//! Raw records spell their coordinate fields dozens of ways (`lat`,
//! `Latitude`, `position.lat`, `coords.lng`, ...). Instead of ad hoc key
//! guessing scattered through the geometry code, each record kind declares
//! its alias lists once here and the resolver tries them in declared order.

use std::collections::HashMap;

use super::RecordKind;

/// Alias paths for one record kind.
///
/// Each entry is a field path; a single `.` denotes one level of nesting
/// (`"position.lat"`). Paths are tried in declared order and the first
/// parseable value wins.
#[derive(Debug, Clone, PartialEq)]
pub struct KindAliases {
    pub lat: Vec<String>,
    pub lon: Vec<String>,
    pub timestamp: Vec<String>,
    pub severity: Vec<String>,
}

impl KindAliases {
    fn from_slices(lat: &[&str], lon: &[&str], timestamp: &[&str], severity: &[&str]) -> Self {
        let own = |s: &[&str]| s.iter().map(|a| a.to_string()).collect();
        Self {
            lat: own(lat),
            lon: own(lon),
            timestamp: own(timestamp),
            severity: own(severity),
        }
    }
}

impl Default for KindAliases {
    /// The common spellings shared by every kind: flat fields, nested
    /// `position`/`location`/`coords` objects, capitalization variants,
    /// and the `lng`/`lon`/`long`/`longitude` zoo.
    fn default() -> Self {
        Self::from_slices(
            &[
                "lat",
                "latitude",
                "Lat",
                "Latitude",
                "position.lat",
                "location.lat",
                "coords.lat",
                "geo.lat",
            ],
            &[
                "lng",
                "lon",
                "long",
                "longitude",
                "Lng",
                "Lon",
                "Longitude",
                "position.lng",
                "position.lon",
                "location.lng",
                "location.lon",
                "coords.lng",
                "coords.lon",
                "geo.lng",
                "geo.lon",
            ],
            &["timestamp", "time", "updatedAt", "updated_at", "reportedAt"],
            &["severity", "level", "priority"],
        )
    }
}

/// Per-kind alias tables, resolved once before any geometry code runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    kinds: HashMap<RecordKind, KindAliases>,
}

impl AliasTable {
    /// Alias lists for a kind.
    pub fn for_kind(&self, kind: RecordKind) -> &KindAliases {
        // Every kind is populated at construction time.
        &self.kinds[&kind]
    }

    /// Replace the alias lists of one kind.
    pub fn with_kind(mut self, kind: RecordKind, aliases: KindAliases) -> Self {
        self.kinds.insert(kind, aliases);
        self
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut kinds: HashMap<RecordKind, KindAliases> = RecordKind::ALL
            .iter()
            .map(|k| (*k, KindAliases::default()))
            .collect();

        // Kind-specific spellings observed in the wild, tried after the
        // common set would be wrong: they take precedence, so they go first.
        if let Some(traffic) = kinds.get_mut(&RecordKind::Traffic) {
            let mut lat = vec!["incidentLat".to_string()];
            lat.extend(traffic.lat.drain(..));
            traffic.lat = lat;
            let mut lon = vec!["incidentLng".to_string()];
            lon.extend(traffic.lon.drain(..));
            traffic.lon = lon;
        }
        if let Some(crowd) = kinds.get_mut(&RecordKind::Crowd) {
            crowd.severity.insert(0, "density".to_string());
        }

        Self { kinds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_kinds() {
        let table = AliasTable::default();
        for kind in RecordKind::ALL {
            let aliases = table.for_kind(kind);
            assert!(!aliases.lat.is_empty(), "{} has no lat aliases", kind);
            assert!(!aliases.lon.is_empty(), "{} has no lon aliases", kind);
        }
    }

    #[test]
    fn test_traffic_specific_aliases_come_first() {
        let table = AliasTable::default();
        let traffic = table.for_kind(RecordKind::Traffic);
        assert_eq!(traffic.lat[0], "incidentLat");
        assert_eq!(traffic.lon[0], "incidentLng");
    }

    #[test]
    fn test_with_kind_replaces_aliases() {
        let table = AliasTable::default().with_kind(
            RecordKind::Event,
            KindAliases {
                lat: vec!["y".to_string()],
                lon: vec!["x".to_string()],
                timestamp: vec![],
                severity: vec![],
            },
        );
        assert_eq!(table.for_kind(RecordKind::Event).lat, vec!["y"]);
        // Other kinds keep their defaults
        assert!(table.for_kind(RecordKind::Place).lat.contains(&"lat".to_string()));
    }
}
