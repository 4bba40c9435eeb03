//! Fire-and-forget mutation requests against the live world.
//!
//! Commands issued here are requests, not transactions: the world applies
//! them on its own schedule, some ticks later, and offers no undo. Callers
//! confirm every effect by polling the [`WorldView`] side of the seam.
//!
//! [`WorldView`]: crate::view::WorldView

use wayfarer_types::{Area, EquipVerb, ItemId, ItemRequest};

/// Mutation-request interface to the live world.
///
/// Every method issues one world command and returns immediately. The only
/// exception is [`walk_to`], which the navigation collaborator implements
/// as blocking-until-arrival (and as a no-op when already there).
///
/// [`walk_to`]: WorldActions::walk_to
pub trait WorldActions {
    /// Walk the agent to `area`. Blocks until the agent is there.
    fn walk_to(&self, area: Area);

    /// Request that the stash interface be opened.
    fn open_stash(&self);

    /// Request that every loose carried item be deposited into the stash.
    fn deposit_all(&self);

    /// Request a withdrawal of `quantity` of `id` from the stash.
    ///
    /// `use_noted` asks for the banknote form where the protocol supports
    /// it; the fulfillment engine always passes `false`.
    fn withdraw(&self, id: ItemId, quantity: u32, use_noted: bool);

    /// Place one marketplace order per request, as a single batch.
    fn buy(&self, orders: &[ItemRequest]);

    /// Request removal of a worn item (it becomes loose in Carried).
    fn remove_worn(&self, id: ItemId);

    /// Issue the given "put on" verb against a carried item.
    fn use_equip_verb(&self, id: ItemId, verb: EquipVerb);
}
