//! Read-only store queries and the sufficiency predicates.
//!
//! [`StoreView`] wraps an injected [`WorldView`] and answers the two
//! questions scripts ask before committing to a stash trip: "do I already
//! have enough of everything?" and "do I have enough loose in my pack?".
//!
//! The sufficiency check is deliberately per-store: a request is satisfied
//! when Carried alone meets the quantity or Worn alone meets the quantity,
//! never by their sum. Equip and unequip flows rely on this -- an equipped
//! copy plus a loose partial stack does not make a full loose stack.

use wayfarer_types::{ItemId, ItemRequest, ItemStack, StoreKind};
use wayfarer_world::WorldView;

/// Read-only snapshot accessor over the item stores.
///
/// Every query goes straight to the world; nothing is cached between
/// calls. Holds only a borrow, so it is cheap to construct at each call
/// site that needs fresh numbers.
#[derive(Debug)]
pub struct StoreView<'a, W: WorldView> {
    world: &'a W,
}

impl<'a, W: WorldView> StoreView<'a, W> {
    /// Create a view over the given world.
    pub const fn new(world: &'a W) -> Self {
        Self { world }
    }

    /// Current count of `id` inside `store`; 0 if absent.
    pub fn quantity(&self, store: StoreKind, id: ItemId) -> u32 {
        self.world.quantity(store, id)
    }

    /// Whether `store` currently holds any quantity of `id`.
    pub fn exists(&self, store: StoreKind, id: ItemId) -> bool {
        self.world.exists(store, id)
    }

    /// Snapshot of every stack currently inside the stash.
    ///
    /// Taken once per call; the returned list does not track later changes.
    pub fn list_stashed(&self) -> Vec<ItemStack> {
        self.world.list_stashed()
    }

    /// Whether every request is individually satisfied by Carried alone or
    /// Worn alone.
    ///
    /// Short-circuits on the first failing request. A request with
    /// `quantity == 0` always passes.
    pub fn has_sufficient(&self, requests: &[ItemRequest]) -> bool {
        requests.iter().all(|req| {
            self.quantity(StoreKind::Carried, req.id) >= req.quantity
                || self.quantity(StoreKind::Worn, req.id) >= req.quantity
        })
    }

    /// Whether every request is satisfied by Carried alone.
    ///
    /// Used when equipped copies must not count, e.g. before handing items
    /// over or using them as consumables.
    pub fn has_carried(&self, requests: &[ItemRequest]) -> bool {
        requests
            .iter()
            .all(|req| self.quantity(StoreKind::Carried, req.id) >= req.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wayfarer_world::InMemoryWorld;

    use super::*;

    const SWORD: ItemId = ItemId::new(1227);
    const COINS: ItemId = ItemId::new(995);

    #[test]
    fn quantity_and_exists_reflect_the_world() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Carried, COINS, 120);

        let view = StoreView::new(&world);
        assert_eq!(view.quantity(StoreKind::Carried, COINS), 120);
        assert!(view.exists(StoreKind::Carried, COINS));
        assert!(!view.exists(StoreKind::Worn, COINS));
    }

    #[test]
    fn worn_alone_satisfies() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Worn, SWORD, 1);

        let view = StoreView::new(&world);
        assert!(view.has_sufficient(&[ItemRequest::new(SWORD, 1)]));
        assert!(!view.has_carried(&[ItemRequest::new(SWORD, 1)]));
    }

    #[test]
    fn carried_alone_satisfies() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Carried, COINS, 500);

        let view = StoreView::new(&world);
        assert!(view.has_sufficient(&[ItemRequest::new(COINS, 500)]));
        assert!(view.has_carried(&[ItemRequest::new(COINS, 500)]));
    }

    #[test]
    fn stores_are_never_summed() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Worn, SWORD, 1);
        world.set_quantity(StoreKind::Carried, SWORD, 1);

        let view = StoreView::new(&world);
        // 1 worn + 1 carried is not 2 of either store.
        assert!(!view.has_sufficient(&[ItemRequest::new(SWORD, 2)]));
    }

    #[test]
    fn all_requests_must_pass_individually() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Carried, COINS, 1000);

        let view = StoreView::new(&world);
        let requests = [ItemRequest::new(COINS, 1000), ItemRequest::new(SWORD, 1)];
        assert!(!view.has_sufficient(&requests));
    }

    #[test]
    fn zero_quantity_requests_always_pass() {
        let world = InMemoryWorld::new();
        let view = StoreView::new(&world);
        assert!(view.has_sufficient(&[ItemRequest::new(SWORD, 0)]));
        assert!(view.has_carried(&[ItemRequest::new(SWORD, 0)]));
    }

    #[test]
    fn empty_request_list_is_satisfied() {
        let world = InMemoryWorld::new();
        let view = StoreView::new(&world);
        assert!(view.has_sufficient(&[]));
    }

    #[test]
    fn duplicate_ids_checked_independently() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Carried, COINS, 500);

        let view = StoreView::new(&world);
        // Each entry is checked against the same store on its own; the
        // list is not merged into a single 800-coin requirement.
        let requests = [ItemRequest::new(COINS, 300), ItemRequest::new(COINS, 500)];
        assert!(view.has_sufficient(&requests));
    }

    #[test]
    fn list_stashed_is_a_snapshot() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Stashed, COINS, 2000);

        let view = StoreView::new(&world);
        let snapshot = view.list_stashed();
        world.set_quantity(StoreKind::Stashed, COINS, 0);

        assert_eq!(snapshot, vec![ItemStack::new(COINS, 2000)]);
        assert!(view.list_stashed().is_empty());
    }
}
