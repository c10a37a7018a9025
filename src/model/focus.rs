//! Immediate-focus items — the global priority list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Description given to focus items created without one.
pub const DEFAULT_FOCUS_DESCRIPTION: &str = "New Focus Area";

/// Status label given to freshly created focus items.
pub const DEFAULT_FOCUS_STATUS: &str = "Priority";

/// A mission-critical priority. Not tied to any date; lives in one global
/// list alongside the daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusItem {
    pub id: Uuid,
    pub description: String,
    /// Free-text status label, e.g. `Priority` or `Blocked`.
    pub status: String,
}

impl FocusItem {
    pub fn new(description: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            status: status.into(),
        }
    }
}

impl Default for FocusItem {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_DESCRIPTION, DEFAULT_FOCUS_STATUS)
    }
}

/// Partial update for a focus item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FocusPatch {
    pub description: Option<String>,
    pub status: Option<String>,
}

impl FocusPatch {
    pub fn apply(self, item: &mut FocusItem) {
        if let Some(v) = self.description {
            item.description = v;
        }
        if let Some(v) = self.status {
            item.status = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_focus_item() {
        let item = FocusItem::default();
        assert_eq!(item.description, "New Focus Area");
        assert_eq!(item.status, "Priority");
    }

    #[test]
    fn focus_serde_roundtrip() {
        let item = FocusItem::new("Ship the release", "In Progress");
        let json = serde_json::to_string(&item).unwrap();
        let parsed: FocusItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn patch_leaves_absent_fields() {
        let mut item = FocusItem::new("Ship the release", "Priority");
        let id = item.id;
        FocusPatch {
            status: Some("Done".to_string()),
            ..FocusPatch::default()
        }
        .apply(&mut item);
        assert_eq!(item.status, "Done");
        assert_eq!(item.description, "Ship the release");
        assert_eq!(item.id, id);
    }
}
