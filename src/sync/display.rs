//! Display payload derivation from bundle summaries.

use serde_json::Value;

use crate::bundle::Bundle;
use crate::record::RecordKind;
use crate::surface::DisplayPayload;

/// Fields tried, in order, when labeling a record in a popup line.
const TITLE_FIELDS: [&str; 4] = ["title", "name", "label", "description"];

fn title_of(payload: &Value) -> Option<&str> {
    TITLE_FIELDS
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_str))
}

/// Build the display payload for a bundle's marker.
///
/// The icon is the kind with the most members (ties to kind declaration
/// order); the popup gets one line per kind with members, labeled by the
/// latest member's title when one exists.
pub fn display_payload(bundle: &Bundle) -> DisplayPayload {
    let mut icon = RecordKind::Event;
    let mut icon_count = 0;
    let mut popup_lines = Vec::new();

    for kind in RecordKind::ALL {
        let count = bundle.members_of(kind).len();
        if count == 0 {
            continue;
        }
        if count > icon_count {
            icon = kind;
            icon_count = count;
        }

        let line = match bundle.latest_of(kind).and_then(|r| title_of(&r.payload)) {
            Some(title) => format!("{} {}: {}", count, kind, title),
            None => format!("{} {}", count, kind),
        };
        popup_lines.push(line);
    }

    DisplayPayload {
        icon,
        badge_count: bundle.total_count,
        max_severity: bundle.max_severity,
        popup_lines,
    }
}
