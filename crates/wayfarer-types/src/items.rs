//! Item request and snapshot stack types.
//!
//! An [`ItemRequest`] is what a caller asks the engine to guarantee on
//! hand; an [`ItemStack`] is one row of an observed store snapshot. Both
//! are plain values: the live world is the only owner of actual state.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// A requested `(item, quantity)` pair.
///
/// A list of requests is the unit of work for the fulfillment engine.
/// Duplicate ids in one list are deliberate and handled independently --
/// the engine never merges them on the caller's behalf. A request with
/// `quantity == 0` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// The item kind being requested.
    pub id: ItemId,
    /// The minimum quantity the agent must end up holding.
    pub quantity: u32,
}

impl ItemRequest {
    /// Create a request for `quantity` of the given item.
    pub const fn new(id: ItemId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// One `(item, quantity)` row of a store snapshot.
///
/// Snapshots are taken once per call site and never cached across calls:
/// the world mutates between ticks outside the engine's control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item kind observed.
    pub id: ItemId,
    /// The quantity observed at snapshot time.
    pub quantity: u32,
}

impl ItemStack {
    /// Create a snapshot row.
    pub const fn new(id: ItemId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_holds_id_and_quantity() {
        let req = ItemRequest::new(ItemId::new(995), 5000);
        assert_eq!(req.id, ItemId::new(995));
        assert_eq!(req.quantity, 5000);
    }

    #[test]
    fn duplicate_ids_stay_distinct_entries() {
        let requests = vec![
            ItemRequest::new(ItemId::new(1511), 5),
            ItemRequest::new(ItemId::new(1511), 3),
        ];
        // The type layer does no merging; both entries survive as-is.
        assert_eq!(requests.len(), 2);
        assert_eq!(requests.first().map(|r| r.quantity), Some(5));
        assert_eq!(requests.last().map(|r| r.quantity), Some(3));
    }

    #[test]
    fn serde_round_trip() {
        let stack = ItemStack::new(ItemId::new(554), 120);
        let json = serde_json::to_string(&stack).unwrap();
        let back: ItemStack = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stack);
    }
}
