use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of bulk-add candidates against the catalog and the list.
///
/// Every deduplicated candidate lands in exactly one bucket, in the order the
/// caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkValidation {
    /// In the catalog and not yet a member
    pub valid_ids: Vec<Uuid>,
    /// Not in the catalog
    pub invalid_ids: Vec<Uuid>,
    /// In the catalog but already a member of the list
    pub already_member_ids: Vec<Uuid>,
}

impl BulkValidation {
    pub fn has_insertable(&self) -> bool {
        !self.valid_ids.is_empty()
    }

    /// True when not a single candidate exists in the catalog
    pub fn nothing_in_catalog(&self) -> bool {
        self.valid_ids.is_empty() && self.already_member_ids.is_empty()
    }
}

/// Counts reported by a bulk insert: `skipped = requested - added`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAddOutcome {
    pub added: usize,
    pub skipped: usize,
}

impl BulkAddOutcome {
    pub fn new(added: usize, requested: usize) -> Self {
        Self {
            added,
            skipped: requested.saturating_sub(added),
        }
    }
}
