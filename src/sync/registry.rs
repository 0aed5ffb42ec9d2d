//! Marker registry: the single owner of live marker handles.

use std::collections::HashMap;

use crate::bundle::BundleKey;
use crate::coord::GeoPoint;
use crate::surface::{DisplayPayload, MarkerHandle};

/// Everything the synchronizer remembers about one live marker.
///
/// Anchor and payload are cached so an unchanged bundle can be recognized
/// without issuing any surface command.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredMarker {
    pub handle: MarkerHandle,
    pub anchor: GeoPoint,
    pub payload: DisplayPayload,
}

/// `BundleKey → MarkerHandle` mapping with cached display state.
///
/// Owned exclusively by one `SyncContext`; at most one handle per key.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: HashMap<BundleKey, RegisteredMarker>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &BundleKey) -> Option<&RegisteredMarker> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &BundleKey) -> Option<&mut RegisteredMarker> {
        self.entries.get_mut(key)
    }

    pub fn insert(&mut self, key: BundleKey, marker: RegisteredMarker) {
        self.entries.insert(key, marker);
    }

    pub fn remove(&mut self, key: &BundleKey) -> Option<RegisteredMarker> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &BundleKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &BundleKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BundleKey, &RegisteredMarker)> {
        self.entries.iter()
    }

    /// Anchor positions of every live marker, for viewport fitting.
    pub fn positions(&self) -> Vec<GeoPoint> {
        self.entries.values().map(|m| m.anchor).collect()
    }

    /// Remove and yield every entry, leaving the registry empty.
    pub fn drain(&mut self) -> impl Iterator<Item = (BundleKey, RegisteredMarker)> + '_ {
        self.entries.drain()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;

    fn marker(raw: u64) -> RegisteredMarker {
        RegisteredMarker {
            handle: MarkerHandle::new(raw),
            anchor: GeoPoint::checked(10.0, 20.0).unwrap(),
            payload: DisplayPayload {
                icon: RecordKind::Event,
                badge_count: 1,
                max_severity: 0,
                popup_lines: vec![],
            },
        }
    }

    #[test]
    fn test_one_handle_per_key() {
        let mut registry = MarkerRegistry::new();
        let key = BundleKey::cell(1, 2);

        registry.insert(key.clone(), marker(1));
        registry.insert(key.clone(), marker(2));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&key).unwrap().handle, MarkerHandle::new(2));
    }

    #[test]
    fn test_drain_empties_registry() {
        let mut registry = MarkerRegistry::new();
        registry.insert(BundleKey::cell(0, 0), marker(1));
        registry.insert(BundleKey::cell(0, 1), marker(2));

        let drained: Vec<_> = registry.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(registry.is_empty());
    }
}
