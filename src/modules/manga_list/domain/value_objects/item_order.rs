use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// New order value for one membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrder {
    /// Membership row id, not the manga id
    pub item_id: Uuid,
    pub order: i32,
}

impl ItemOrder {
    pub fn new(item_id: Uuid, order: i32) -> Self {
        Self { item_id, order }
    }
}
