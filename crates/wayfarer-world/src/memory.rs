//! Deterministic in-memory world double.
//!
//! [`InMemoryWorld`] implements both sides of the world seam for unit and
//! integration tests (and for dry-running scripts without a live session).
//! Commands do not take effect immediately: each one becomes a pending
//! effect that applies when the world's tick counter reaches
//! `issued_at + latency`, which reproduces the live world's behavior of
//! reflecting an action some ticks after it was issued.
//!
//! The double is cheap to clone (all state behind one shared handle) so a
//! test can hand one copy to the engine and keep another for assertions
//! and for advancing the tick counter.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use wayfarer_types::{Area, EquipVerb, ItemId, ItemRequest, ItemStack, StoreKind};

use crate::actions::WorldActions;
use crate::view::WorldView;

/// A world command waiting for its effect to become visible.
#[derive(Debug, Clone)]
enum Effect {
    /// The stash interface opens.
    OpenStash,
    /// Every carried stack moves into the stash.
    DepositAll,
    /// Up to `quantity` of `id` moves from the stash into Carried.
    Withdraw {
        /// The item withdrawn.
        id: ItemId,
        /// The amount requested.
        quantity: u32,
    },
    /// A batch of marketplace orders settles into Carried.
    Settle {
        /// The orders that settle together.
        orders: Vec<ItemRequest>,
    },
    /// A worn stack moves into Carried.
    RemoveWorn {
        /// The item removed.
        id: ItemId,
    },
    /// A carried stack moves into Worn.
    PutOn {
        /// The item equipped.
        id: ItemId,
    },
}

/// Shared mutable state of the double.
#[derive(Debug, Default)]
struct WorldState {
    /// The world's current tick (advanced externally).
    now: u64,
    /// Worn store contents.
    worn: BTreeMap<ItemId, u32>,
    /// Carried store contents.
    carried: BTreeMap<ItemId, u32>,
    /// Stashed store contents.
    stashed: BTreeMap<ItemId, u32>,
    /// Equip capability per item kind (static metadata).
    verbs: BTreeMap<ItemId, EquipVerb>,
    /// Whether the stash interface is open.
    stash_open: bool,
    /// Where the agent currently stands, if anywhere named.
    location: Option<Area>,
    /// Ticks between command issue and visible effect.
    latency: u64,
    /// When set, withdraw commands are silently lost.
    drop_withdrawals: bool,
    /// Effects not yet applied, tagged with their due tick.
    pending: Vec<(u64, Effect)>,
    /// Every order ever passed to `buy`, flattened in issue order.
    buy_orders: Vec<ItemRequest>,
    /// Every withdraw command issued, including dropped ones.
    withdraw_log: Vec<ItemStack>,
    /// Count of equip/remove interactions issued.
    interactions: u64,
}

/// Deterministic in-memory implementation of the world seam.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorld {
    inner: Arc<Mutex<WorldState>>,
}

impl InMemoryWorld {
    /// Create an empty world that applies effects on the next tick.
    pub fn new() -> Self {
        Self::with_latency(1)
    }

    /// Create an empty world whose effects become visible `latency` ticks
    /// after the command is issued (0 = immediately).
    pub fn with_latency(latency: u64) -> Self {
        let state = WorldState {
            latency,
            ..WorldState::default()
        };
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorldState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the quantity of `id` inside a real store.
    ///
    /// Setting a `Market` quantity is meaningless (the market is unbounded)
    /// and is ignored.
    pub fn set_quantity(&self, store: StoreKind, id: ItemId, quantity: u32) {
        let mut state = self.lock();
        let slot = match store {
            StoreKind::Worn => &mut state.worn,
            StoreKind::Carried => &mut state.carried,
            StoreKind::Stashed => &mut state.stashed,
            StoreKind::Market => return,
        };
        if quantity == 0 {
            slot.remove(&id);
        } else {
            slot.insert(id, quantity);
        }
    }

    /// Declare the equip verb an item's metadata advertises.
    pub fn set_equip_verb(&self, id: ItemId, verb: EquipVerb) {
        self.lock().verbs.insert(id, verb);
    }

    /// Make withdraw commands disappear without effect (timeout testing).
    pub fn drop_withdrawals(&self, drop: bool) {
        self.lock().drop_withdrawals = drop;
    }

    /// Advance the world's tick counter and apply every effect now due.
    ///
    /// Call this before notifying waiters of the new tick so that a
    /// condition sampled on tick `t` observes everything due at `t`.
    pub fn advance_to(&self, tick: u64) {
        let mut state = self.lock();
        state.now = state.now.max(tick);
        let now = state.now;

        let due: Vec<Effect> = {
            let mut kept = Vec::new();
            let mut ready = Vec::new();
            for (at, effect) in state.pending.drain(..) {
                if at <= now {
                    ready.push(effect);
                } else {
                    kept.push((at, effect));
                }
            }
            state.pending = kept;
            ready
        };

        for effect in due {
            apply(&mut state, &effect);
        }
    }

    /// The world's current tick.
    pub fn now(&self) -> u64 {
        self.lock().now
    }

    /// Where the agent currently stands, if anywhere named.
    pub fn location(&self) -> Option<Area> {
        self.lock().location
    }

    /// Every order ever passed to `buy`, flattened in issue order.
    pub fn buy_orders(&self) -> Vec<ItemRequest> {
        self.lock().buy_orders.clone()
    }

    /// Every withdraw command issued so far, including dropped ones.
    pub fn withdraw_log(&self) -> Vec<ItemStack> {
        self.lock().withdraw_log.clone()
    }

    /// How many equip/remove interactions have been issued.
    pub fn interaction_count(&self) -> u64 {
        self.lock().interactions
    }

    fn queue(&self, effect: Effect) {
        let mut state = self.lock();
        if state.latency == 0 {
            apply(&mut state, &effect);
        } else {
            let due = state.now.saturating_add(state.latency);
            state.pending.push((due, effect));
        }
    }
}

/// Move the full stack of `id` from one store map to another.
fn move_stack(from: &mut BTreeMap<ItemId, u32>, to: &mut BTreeMap<ItemId, u32>, id: ItemId) {
    if let Some(qty) = from.remove(&id) {
        let entry = to.entry(id).or_insert(0);
        *entry = entry.saturating_add(qty);
    }
}

fn apply(state: &mut WorldState, effect: &Effect) {
    match effect {
        Effect::OpenStash => {
            state.stash_open = true;
        }
        Effect::DepositAll => {
            let carried = core::mem::take(&mut state.carried);
            for (id, qty) in carried {
                let entry = state.stashed.entry(id).or_insert(0);
                *entry = entry.saturating_add(qty);
            }
        }
        Effect::Withdraw { id, quantity } => {
            let available = state.stashed.get(id).copied().unwrap_or(0);
            let moved = available.min(*quantity);
            if moved > 0 {
                let remaining = available.saturating_sub(moved);
                if remaining == 0 {
                    state.stashed.remove(id);
                } else {
                    state.stashed.insert(*id, remaining);
                }
                let entry = state.carried.entry(*id).or_insert(0);
                *entry = entry.saturating_add(moved);
            }
        }
        Effect::Settle { orders } => {
            for order in orders {
                let entry = state.carried.entry(order.id).or_insert(0);
                *entry = entry.saturating_add(order.quantity);
            }
        }
        Effect::RemoveWorn { id } => {
            let (worn, carried) = (&mut state.worn, &mut state.carried);
            move_stack(worn, carried, *id);
        }
        Effect::PutOn { id } => {
            let (carried, worn) = (&mut state.carried, &mut state.worn);
            move_stack(carried, worn, *id);
        }
    }
}

impl WorldView for InMemoryWorld {
    fn quantity(&self, store: StoreKind, id: ItemId) -> u32 {
        let state = self.lock();
        let slot = match store {
            StoreKind::Worn => &state.worn,
            StoreKind::Carried => &state.carried,
            StoreKind::Stashed => &state.stashed,
            // The market is unbounded: everything is "available" but the
            // agent owns none of it.
            StoreKind::Market => return 0,
        };
        slot.get(&id).copied().unwrap_or(0)
    }

    fn list_stashed(&self) -> Vec<ItemStack> {
        self.lock()
            .stashed
            .iter()
            .map(|(&id, &quantity)| ItemStack::new(id, quantity))
            .collect()
    }

    fn carried_is_empty(&self) -> bool {
        self.lock().carried.values().all(|&q| q == 0)
    }

    fn stash_open(&self) -> bool {
        self.lock().stash_open
    }

    fn market_settled(&self) -> bool {
        !self
            .lock()
            .pending
            .iter()
            .any(|(_, effect)| matches!(effect, Effect::Settle { .. }))
    }

    fn equip_verb(&self, id: ItemId) -> Option<EquipVerb> {
        self.lock().verbs.get(&id).copied()
    }
}

impl WorldActions for InMemoryWorld {
    fn walk_to(&self, area: Area) {
        // Navigation blocks until arrival; the double arrives instantly.
        debug!(?area, "walking");
        self.lock().location = Some(area);
    }

    fn open_stash(&self) {
        self.queue(Effect::OpenStash);
    }

    fn deposit_all(&self) {
        self.queue(Effect::DepositAll);
    }

    fn withdraw(&self, id: ItemId, quantity: u32, use_noted: bool) {
        debug!(%id, quantity, use_noted, "withdraw requested");
        let dropped = {
            let mut state = self.lock();
            state.withdraw_log.push(ItemStack::new(id, quantity));
            state.drop_withdrawals
        };
        if dropped {
            return;
        }
        self.queue(Effect::Withdraw { id, quantity });
    }

    fn buy(&self, orders: &[ItemRequest]) {
        if orders.is_empty() {
            return;
        }
        self.lock().buy_orders.extend_from_slice(orders);
        self.queue(Effect::Settle {
            orders: orders.to_vec(),
        });
    }

    fn remove_worn(&self, id: ItemId) {
        {
            let mut state = self.lock();
            state.interactions = state.interactions.saturating_add(1);
        }
        self.queue(Effect::RemoveWorn { id });
    }

    fn use_equip_verb(&self, id: ItemId, verb: EquipVerb) {
        debug!(%id, %verb, "equip interaction issued");
        {
            let mut state = self.lock();
            state.interactions = state.interactions.saturating_add(1);
        }
        self.queue(Effect::PutOn { id });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SWORD: ItemId = ItemId::new(1227);
    const COINS: ItemId = ItemId::new(995);

    #[test]
    fn quantities_start_at_zero() {
        let world = InMemoryWorld::new();
        assert_eq!(world.quantity(StoreKind::Carried, SWORD), 0);
        assert!(!world.exists(StoreKind::Worn, SWORD));
        assert!(world.carried_is_empty());
        assert!(world.list_stashed().is_empty());
    }

    #[test]
    fn set_quantity_is_visible_immediately() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Stashed, COINS, 2000);
        assert_eq!(world.quantity(StoreKind::Stashed, COINS), 2000);
        assert_eq!(
            world.list_stashed(),
            vec![ItemStack::new(COINS, 2000)]
        );
    }

    #[test]
    fn effects_apply_after_latency() {
        let world = InMemoryWorld::with_latency(2);
        world.set_quantity(StoreKind::Stashed, COINS, 100);

        world.withdraw(COINS, 40, false);
        assert_eq!(world.quantity(StoreKind::Carried, COINS), 0);

        world.advance_to(1);
        assert_eq!(world.quantity(StoreKind::Carried, COINS), 0);

        world.advance_to(2);
        assert_eq!(world.quantity(StoreKind::Carried, COINS), 40);
        assert_eq!(world.quantity(StoreKind::Stashed, COINS), 60);
    }

    #[test]
    fn zero_latency_applies_at_issue_time() {
        let world = InMemoryWorld::with_latency(0);
        world.open_stash();
        assert!(world.stash_open());
    }

    #[test]
    fn deposit_all_moves_every_carried_stack() {
        let world = InMemoryWorld::with_latency(0);
        world.set_quantity(StoreKind::Carried, COINS, 500);
        world.set_quantity(StoreKind::Carried, SWORD, 1);
        world.set_quantity(StoreKind::Stashed, COINS, 100);

        world.deposit_all();
        assert!(world.carried_is_empty());
        assert_eq!(world.quantity(StoreKind::Stashed, COINS), 600);
        assert_eq!(world.quantity(StoreKind::Stashed, SWORD), 1);
    }

    #[test]
    fn withdraw_is_capped_by_stash_contents() {
        let world = InMemoryWorld::with_latency(0);
        world.set_quantity(StoreKind::Stashed, COINS, 30);
        world.withdraw(COINS, 100, false);
        assert_eq!(world.quantity(StoreKind::Carried, COINS), 30);
        assert_eq!(world.quantity(StoreKind::Stashed, COINS), 0);
    }

    #[test]
    fn dropped_withdrawals_never_apply() {
        let world = InMemoryWorld::with_latency(0);
        world.set_quantity(StoreKind::Stashed, COINS, 100);
        world.drop_withdrawals(true);
        world.withdraw(COINS, 50, false);
        world.advance_to(10);
        assert_eq!(world.quantity(StoreKind::Carried, COINS), 0);
    }

    #[test]
    fn buy_settles_into_carried_and_is_recorded() {
        let world = InMemoryWorld::with_latency(1);
        let order = ItemRequest::new(COINS, 3000);

        world.buy(&[order]);
        assert!(!world.market_settled());
        assert_eq!(world.buy_orders(), vec![order]);

        world.advance_to(1);
        assert!(world.market_settled());
        assert_eq!(world.quantity(StoreKind::Carried, COINS), 3000);
    }

    #[test]
    fn empty_buy_is_ignored() {
        let world = InMemoryWorld::new();
        world.buy(&[]);
        assert!(world.market_settled());
        assert!(world.buy_orders().is_empty());
    }

    #[test]
    fn remove_and_put_on_move_whole_stacks() {
        let world = InMemoryWorld::with_latency(0);
        world.set_quantity(StoreKind::Worn, SWORD, 1);

        world.remove_worn(SWORD);
        assert_eq!(world.quantity(StoreKind::Worn, SWORD), 0);
        assert_eq!(world.quantity(StoreKind::Carried, SWORD), 1);

        world.use_equip_verb(SWORD, EquipVerb::Wield);
        assert_eq!(world.quantity(StoreKind::Worn, SWORD), 1);
        assert_eq!(world.quantity(StoreKind::Carried, SWORD), 0);
        assert_eq!(world.interaction_count(), 2);
    }

    #[test]
    fn clones_share_state() {
        let world = InMemoryWorld::new();
        let other = world.clone();
        world.set_quantity(StoreKind::Carried, COINS, 7);
        assert_eq!(other.quantity(StoreKind::Carried, COINS), 7);
    }

    #[test]
    fn walk_to_records_location() {
        let world = InMemoryWorld::new();
        assert_eq!(world.location(), None);
        world.walk_to(Area::Market);
        assert_eq!(world.location(), Some(Area::Market));
    }
}
