//! The fulfillment orchestrator: `ensure` and `equip`.
//!
//! [`Fulfillment`] is the public entry point of the engine. It reads store
//! snapshots through [`StoreView`], asks the planner for a shortfall plan,
//! and issues the plan's mutations through the world seam -- confirming
//! each one via the polling wait before the next step proceeds, because
//! the world only reflects commands some ticks after they are issued.
//!
//! Mutations are irreversible world actions. The engine is idempotent
//! anyway: every step re-checks the live quantity and computes a fresh
//! delta, so re-invoking `ensure` after a partial failure re-derives the
//! remaining work instead of re-issuing the original deltas. Callers treat
//! `ensure` as at-least-once and safely retriable.
//!
//! One orchestrator per agent, one logical flow: no two mutating steps of
//! one call are ever issued concurrently, and callers driving the same
//! agent from several tasks must serialize externally.

use tracing::{debug, info, warn};
use wayfarer_types::{Area, EquipVerb, ItemId, ItemRequest, PlanStep, StoreKind};
use wayfarer_world::{WorldActions, WorldView};

use crate::clock::TickStream;
use crate::config::FulfillConfig;
use crate::error::{FulfillmentError, StepKind};
use crate::planner;
use crate::store::StoreView;
use crate::wait::{self, WaitOutcome};

/// Resource fulfillment and equipping for one agent.
pub struct Fulfillment<W> {
    world: W,
    ticks: TickStream,
    config: FulfillConfig,
}

impl<W: WorldView + WorldActions> Fulfillment<W> {
    /// Create an orchestrator over the given world, tick stream, and budgets.
    pub const fn new(world: W, ticks: TickStream, config: FulfillConfig) -> Self {
        Self {
            world,
            ticks,
            config,
        }
    }

    /// Whether every request is already satisfied by Carried or Worn alone.
    ///
    /// Read-only; scripts use this to skip a stash trip entirely.
    pub fn has_sufficient(&self, requests: &[ItemRequest]) -> bool {
        StoreView::new(&self.world).has_sufficient(requests)
    }

    /// Whether every request is already satisfied by Carried alone.
    pub fn has_carried(&self, requests: &[ItemRequest]) -> bool {
        StoreView::new(&self.world).has_carried(requests)
    }

    /// Guarantee the agent holds at least the requested quantities.
    ///
    /// Sources shortfalls from the stash and falls back to marketplace
    /// purchase, then normalizes through deposit-all and withdraws exact
    /// amounts. Returns without mutating anything when the requests are
    /// already satisfied.
    ///
    /// # Errors
    ///
    /// Returns [`FulfillmentError::Timeout`] when a mutation is never
    /// reflected by the world within its tick budget. Partial progress is
    /// not rolled back; retrying re-derives only the still-missing work.
    pub async fn ensure(&mut self, requests: &[ItemRequest]) -> Result<(), FulfillmentError> {
        if self.has_sufficient(requests) {
            debug!("requests already satisfied, nothing to do");
            return Ok(());
        }

        let plan = planner::plan(&self.world, requests);
        debug!(steps = plan.steps().len(), "executing shortfall plan");

        // Phase 1: free worn stacks that count toward the shortfall.
        for step in plan.steps() {
            if let PlanStep::RemoveFromWorn { id, .. } = *step {
                debug!(%id, "removing worn item");
                self.world.remove_worn(id);
                let world = &self.world;
                confirm(
                    &mut self.ticks,
                    self.config.remove_worn_ticks,
                    StepKind::RemoveWorn,
                    Some(id),
                    || !world.exists(StoreKind::Worn, id),
                )
                .await?;
            }
        }

        // Phase 2: one batched marketplace order for every residual.
        let orders: Vec<ItemRequest> = plan
            .purchases()
            .map(|(id, quantity)| ItemRequest::new(id, quantity))
            .collect();
        if !orders.is_empty() {
            info!(orders = orders.len(), "buying shortfall from the market");
            self.world.walk_to(Area::Market);
            self.world.buy(&orders);
            let world = &self.world;
            confirm(
                &mut self.ticks,
                self.config.purchase_settle_ticks,
                StepKind::Purchase,
                orders.first().map(|order| order.id),
                || world.market_settled(),
            )
            .await?;
        }

        // Phase 3: make the stash canonical.
        self.open_stash().await?;
        if !self.world.carried_is_empty() {
            debug!("depositing all carried items");
            self.world.deposit_all();
            let world = &self.world;
            confirm(
                &mut self.ticks,
                self.config.deposit_ticks,
                StepKind::Deposit,
                None,
                || world.carried_is_empty(),
            )
            .await?;
        }

        // Phase 4: withdraw exact residuals against fresh snapshots.
        for (id, target) in plan.withdrawals() {
            let carried = self.world.quantity(StoreKind::Carried, id);
            let amount = target.saturating_sub(carried);
            if amount == 0 {
                continue;
            }
            debug!(%id, amount, target, "withdrawing");
            self.world.withdraw(id, amount, false);
            let world = &self.world;
            confirm(
                &mut self.ticks,
                self.config.withdraw_ticks,
                StepKind::Withdraw,
                Some(id),
                || world.quantity(StoreKind::Carried, id) >= target,
            )
            .await?;
        }

        info!("requests fulfilled");
        Ok(())
    }

    /// Ensure every listed item is worn.
    ///
    /// Items already worn are skipped. The rest are first brought into
    /// Carried (quantity 1 each) via [`ensure`], then put on with the verb
    /// their metadata advertises, then confirmed worn within the equip
    /// budget.
    ///
    /// # Errors
    ///
    /// Returns [`FulfillmentError::NoEquipVerb`] -- before any interaction
    /// is issued -- if any item advertises none of the recognized verbs,
    /// or [`FulfillmentError::Timeout`] if an item never reports Worn.
    ///
    /// [`ensure`]: Fulfillment::ensure
    pub async fn equip_all(&mut self, ids: &[ItemId]) -> Result<(), FulfillmentError> {
        let missing: Vec<ItemId> = ids
            .iter()
            .copied()
            .filter(|&id| !self.world.exists(StoreKind::Worn, id))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        // Resolve every capability up front so a misconfigured item aborts
        // the call before any world command goes out.
        let mut verbs: Vec<(ItemId, EquipVerb)> = Vec::with_capacity(missing.len());
        for &id in &missing {
            let verb = self
                .world
                .equip_verb(id)
                .ok_or(FulfillmentError::NoEquipVerb(id))?;
            verbs.push((id, verb));
        }

        let requests: Vec<ItemRequest> = missing
            .iter()
            .map(|&id| ItemRequest::new(id, 1))
            .collect();
        self.ensure(&requests).await?;

        for &(id, verb) in &verbs {
            info!(%id, %verb, "equipping");
            self.world.use_equip_verb(id, verb);
        }

        let world = &self.world;
        let outcome = wait::wait_until(&mut self.ticks, Some(self.config.equip_ticks), || {
            missing
                .iter()
                .all(|&id| world.exists(StoreKind::Worn, id))
        })
        .await?;
        if !outcome.is_ready() {
            let unworn = missing
                .iter()
                .copied()
                .find(|&id| !world.exists(StoreKind::Worn, id));
            warn!(item = ?unworn, "equip never reflected by the world");
            return Err(FulfillmentError::Timeout {
                step: StepKind::Equip,
                id: unworn,
            });
        }
        Ok(())
    }

    /// Ensure a single item is worn, assuming it is already on hand.
    ///
    /// Already worn is an immediate no-op. Unlike [`equip_all`], this does
    /// not source the item first: it looks up the item's advertised verb
    /// and puts on the carried copy directly.
    ///
    /// # Errors
    ///
    /// Returns [`FulfillmentError::NoEquipVerb`] if the item advertises no
    /// recognized verb, or [`FulfillmentError::Timeout`] if the world never
    /// reports it worn.
    ///
    /// [`equip_all`]: Fulfillment::equip_all
    pub async fn equip(&mut self, id: ItemId) -> Result<(), FulfillmentError> {
        if self.world.exists(StoreKind::Worn, id) {
            return Ok(());
        }
        let verb = self
            .world
            .equip_verb(id)
            .ok_or(FulfillmentError::NoEquipVerb(id))?;
        info!(%id, %verb, "equipping");
        self.world.use_equip_verb(id, verb);

        let world = &self.world;
        confirm(
            &mut self.ticks,
            self.config.equip_ticks,
            StepKind::Equip,
            Some(id),
            || world.exists(StoreKind::Worn, id),
        )
        .await
    }

    /// Walk to the stash and open it, if it is not open already.
    async fn open_stash(&mut self) -> Result<(), FulfillmentError> {
        if self.world.stash_open() {
            return Ok(());
        }
        debug!("opening the stash");
        self.world.walk_to(Area::Stash);
        self.world.open_stash();
        let world = &self.world;
        confirm(
            &mut self.ticks,
            self.config.stash_open_ticks,
            StepKind::OpenStash,
            None,
            || world.stash_open(),
        )
        .await
    }
}

/// Run one bounded confirmation wait, mapping exhaustion to a timeout error.
async fn confirm<F>(
    ticks: &mut TickStream,
    budget: u64,
    step: StepKind,
    id: Option<ItemId>,
    condition: F,
) -> Result<(), FulfillmentError>
where
    F: FnMut() -> bool,
{
    match wait::wait_until(ticks, Some(budget), condition).await? {
        WaitOutcome::Ready { samples } => {
            debug!(%step, samples, "step confirmed");
            Ok(())
        }
        WaitOutcome::TimedOut { samples } => {
            warn!(%step, samples, item = ?id, "step never reflected by the world");
            Err(FulfillmentError::Timeout { step, id })
        }
    }
}
