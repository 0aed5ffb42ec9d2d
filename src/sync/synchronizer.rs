//! Marker lifecycle synchronizer.
//!
//! Diffs the previous `BundleKey → MarkerHandle` registry against a newly
//! computed bundle set and issues minimal create/update/remove commands:
//! no flicker (markers are updated in place, never destroyed and
//! recreated), no leaks (stale keys are removed), no duplicates (one
//! handle per key).

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::bundle::{Bundle, BundleKey};
use crate::surface::{MapSurface, MarkerLayer};

use super::display::display_payload;
use super::registry::{MarkerRegistry, RegisteredMarker};

/// Counts of commands issued by one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
    /// Surviving keys whose anchor and payload were both unchanged;
    /// no surface command was issued for them.
    pub unchanged: usize,
    /// Per-key collaborator failures; the pass continued past each one.
    pub failed: usize,
}

impl SyncReport {
    /// Structural commands: creates plus removes.
    pub fn structural(&self) -> usize {
        self.created + self.removed
    }
}

/// Reconcile one marker layer against a new bundle set.
///
/// Keys present in the registry but absent from `new_bundles` (or present
/// with a zero count) are removed; new nonzero keys are created; surviving
/// keys are updated in place, and skipped entirely when nothing changed.
///
/// Postcondition, barring collaborator failures: the registry's key set
/// equals exactly the nonzero keys of `new_bundles`. Calling twice with an
/// unchanged bundle map issues zero commands on the second pass.
///
/// Collaborator failures are logged per key and never abort the batch. A
/// failed create leaves no registry entry; a failed remove still drops the
/// entry, since the handle is unusable either way.
pub fn sync_layer<S: MapSurface>(
    surface: &mut S,
    layer: MarkerLayer,
    registry: &mut MarkerRegistry,
    new_bundles: &HashMap<BundleKey, Bundle>,
) -> SyncReport {
    let mut report = SyncReport::default();

    // Removal pass: stale keys and zero-count bundles.
    let stale: Vec<BundleKey> = registry
        .keys()
        .filter(|key| {
            new_bundles
                .get(*key)
                .map_or(true, |bundle| bundle.total_count == 0)
        })
        .cloned()
        .collect();

    for key in stale {
        if let Some(marker) = registry.remove(&key) {
            match surface.remove_marker(marker.handle) {
                Ok(()) => report.removed += 1,
                Err(err) => {
                    warn!(%key, %err, "Failed to remove marker");
                    report.failed += 1;
                }
            }
        }
    }

    // Create/update pass.
    for (key, bundle) in new_bundles {
        if bundle.total_count == 0 {
            continue;
        }
        let payload = display_payload(bundle);

        match registry.get_mut(key) {
            Some(entry) => {
                if entry.anchor == bundle.anchor && entry.payload == payload {
                    report.unchanged += 1;
                    continue;
                }
                match surface.update_marker(entry.handle, bundle.anchor, &payload) {
                    Ok(()) => {
                        entry.anchor = bundle.anchor;
                        entry.payload = payload;
                        report.updated += 1;
                    }
                    Err(err) => {
                        warn!(%key, %err, "Failed to update marker");
                        report.failed += 1;
                    }
                }
            }
            None => match surface.create_marker(layer, bundle.anchor, &payload) {
                Ok(handle) => {
                    registry.insert(
                        key.clone(),
                        RegisteredMarker {
                            handle,
                            anchor: bundle.anchor,
                            payload,
                        },
                    );
                    report.created += 1;
                }
                Err(err) => {
                    warn!(%key, %err, "Failed to create marker");
                    report.failed += 1;
                }
            },
        }
    }

    debug!(
        ?layer,
        created = report.created,
        updated = report.updated,
        removed = report.removed,
        unchanged = report.unchanged,
        failed = report.failed,
        "Marker sync pass complete"
    );

    report
}

/// Remove every marker in a registry, best effort.
///
/// Used when clearing the detail layer and on context disposal.
pub fn clear_layer<S: MapSurface>(surface: &mut S, registry: &mut MarkerRegistry) -> usize {
    let mut removed = 0;
    for (key, marker) in registry.drain() {
        match surface.remove_marker(marker.handle) {
            Ok(()) => removed += 1,
            Err(err) => warn!(%key, %err, "Failed to remove marker during clear"),
        }
    }
    removed
}
