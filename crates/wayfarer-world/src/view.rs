//! Read-only snapshot queries against the live world.
//!
//! Every read goes back to the world: nothing here is cached field-to-field
//! across steps, because a one-tick staleness window is expected and must
//! not compound into incorrect deltas. `list_stashed` returns a snapshot
//! taken once at the call site, not a live view.

use wayfarer_types::{EquipVerb, ItemId, ItemStack, StoreKind};

/// Read-only view of the live world state.
///
/// Implementations answer quantity and existence queries for a
/// `(store, item)` pair and enumerate the stash contents. Queries never
/// block and never mutate; they return the instantaneous world state at the
/// moment of the call.
pub trait WorldView {
    /// Current count of `id` inside `store`; 0 if absent.
    fn quantity(&self, store: StoreKind, id: ItemId) -> u32;

    /// Whether `store` currently holds any quantity of `id`.
    fn exists(&self, store: StoreKind, id: ItemId) -> bool {
        self.quantity(store, id) > 0
    }

    /// Snapshot of every stack currently inside the stash.
    fn list_stashed(&self) -> Vec<ItemStack>;

    /// Whether the agent is carrying nothing depositable.
    fn carried_is_empty(&self) -> bool;

    /// Whether the stash interface is currently open.
    fn stash_open(&self) -> bool;

    /// Whether the marketplace reports all issued orders as settled.
    fn market_settled(&self) -> bool;

    /// The "put on" verb advertised by the item's metadata, if any.
    ///
    /// Resolved from static item metadata as a capability lookup rather
    /// than probed from a live action list at interaction time.
    fn equip_verb(&self, id: ItemId) -> Option<EquipVerb>;
}
