/// Order-value and bulk-insert planning rules.
///
/// Kept free of I/O so every repository implementation computes orders and
/// bulk classifications the same way.
use std::collections::HashSet;
use uuid::Uuid;

use crate::modules::manga_list::domain::value_objects::BulkValidation;
use crate::shared::errors::AppError;

/// Order for the next appended item: `max + 1`, or `0` for an empty list.
///
/// `None` once the list already holds `i32::MAX`.
pub fn next_order_after(current_max: Option<i32>) -> Option<i32> {
    match current_max {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Raised when appending would push an order past `i32::MAX`.
pub fn order_range_exhausted(list_id: Uuid) -> AppError {
    AppError::InvalidInput(format!(
        "Manga list {} has no order values left to append to",
        list_id
    ))
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn dedupe_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Split candidates into insertable, unknown and already-member ids.
pub fn classify_bulk_candidates(
    candidates: &[Uuid],
    in_catalog: &HashSet<Uuid>,
    members: &HashSet<Uuid>,
) -> BulkValidation {
    let mut validation = BulkValidation::default();

    for id in dedupe_ids(candidates) {
        if !in_catalog.contains(&id) {
            validation.invalid_ids.push(id);
        } else if members.contains(&id) {
            validation.already_member_ids.push(id);
        } else {
            validation.valid_ids.push(id);
        }
    }

    validation
}

/// Assign a contiguous block of orders, in the given order, starting at `start`.
///
/// `None` when the block does not fit below `i32::MAX`.
pub fn plan_bulk_insert(valid_ids: &[Uuid], start: i32) -> Option<Vec<(Uuid, i32)>> {
    valid_ids
        .iter()
        .enumerate()
        .map(|(offset, id)| {
            let offset = i32::try_from(offset).ok()?;
            start.checked_add(offset).map(|order| (*id, order))
        })
        .collect()
}
