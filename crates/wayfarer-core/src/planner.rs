//! The acquisition planner: pure shortfall computation.
//!
//! Given a request list and the current store snapshots, [`plan`] produces
//! the ordered [`ShortfallPlan`] that reconciliation executes. The planner
//! performs no I/O beyond reading quantities and never fails; degenerate
//! input (no requests, all zero quantities, everything already satisfied)
//! yields the empty plan.
//!
//! Phase order is fixed: remove-worn, purchase, deposit-all, withdraw-exact.
//! Later phases rely on earlier effects being visible in the world, so the
//! orchestrator confirms each phase before starting the next.
//!
//! A request whose worn quantity alone meets the ask is skipped entirely:
//! its satisfaction survives the deposit-all normalization untouched, and
//! worn items are only force-removed when the same item is also needed as
//! a loose unit.

use wayfarer_types::{ItemRequest, PlanStep, ShortfallPlan, StoreKind};
use wayfarer_world::WorldView;

/// Compute the shortfall plan for `requests` against the current world.
///
/// For each request `(id, q)` with `q > 0` that Worn alone does not
/// satisfy:
///
/// 1. `needed = q - stashed - carried`, clamped at zero.
/// 2. If `needed > 0` and the item is worn, the worn stack is removed
///    (removal lands it in Carried, so the freed quantity counts toward
///    the shortfall).
/// 3. Any remaining `needed` is purchased from the market, exactly.
/// 4. A withdraw step targets `q` carried; the amount actually withdrawn
///    is recomputed from a fresh snapshot at execution time.
///
/// One `DepositAllCarried` step separates the acquisition phases from the
/// withdraw phase, making the stash canonical before exact extraction.
pub fn plan<W: WorldView>(world: &W, requests: &[ItemRequest]) -> ShortfallPlan {
    let mut removals = Vec::new();
    let mut purchases = Vec::new();
    let mut withdrawals = Vec::new();

    for req in requests {
        if req.quantity == 0 {
            continue;
        }
        let worn = world.quantity(StoreKind::Worn, req.id);
        if worn >= req.quantity {
            // Worn presence alone satisfies this request and survives the
            // deposit-all normalization.
            continue;
        }

        let stashed = world.quantity(StoreKind::Stashed, req.id);
        let carried = world.quantity(StoreKind::Carried, req.id);
        let mut needed = req
            .quantity
            .saturating_sub(stashed)
            .saturating_sub(carried);

        if needed > 0 && worn > 0 {
            removals.push(PlanStep::RemoveFromWorn {
                id: req.id,
                quantity: worn,
            });
            needed = needed.saturating_sub(worn);
        }
        if needed > 0 {
            purchases.push(PlanStep::Purchase {
                id: req.id,
                quantity: needed,
            });
        }
        withdrawals.push(PlanStep::Withdraw {
            id: req.id,
            target: req.quantity,
        });
    }

    let mut plan = ShortfallPlan::new();
    if withdrawals.is_empty() {
        return plan;
    }
    for step in removals {
        plan.push(step);
    }
    for step in purchases {
        plan.push(step);
    }
    plan.push(PlanStep::DepositAllCarried);
    for step in withdrawals {
        plan.push(step);
    }
    plan
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wayfarer_types::ItemId;
    use wayfarer_world::InMemoryWorld;

    use super::*;

    const COINS: ItemId = ItemId::new(995);
    const SWORD: ItemId = ItemId::new(1227);
    const SHIELD: ItemId = ItemId::new(1171);

    #[test]
    fn empty_requests_produce_empty_plan() {
        let world = InMemoryWorld::new();
        assert!(plan(&world, &[]).is_empty());
    }

    #[test]
    fn zero_quantity_requests_produce_empty_plan() {
        let world = InMemoryWorld::new();
        let steps = plan(&world, &[ItemRequest::new(COINS, 0)]);
        assert!(steps.is_empty());
    }

    #[test]
    fn worn_satisfied_request_is_untouched() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Worn, SWORD, 1);
        let steps = plan(&world, &[ItemRequest::new(SWORD, 1)]);
        assert!(steps.is_empty());
    }

    #[test]
    fn stash_covered_shortfall_needs_no_purchase() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Stashed, COINS, 2000);

        let steps = plan(&world, &[ItemRequest::new(COINS, 1500)]);
        assert_eq!(
            steps.steps(),
            &[
                PlanStep::DepositAllCarried,
                PlanStep::Withdraw {
                    id: COINS,
                    target: 1500
                },
            ]
        );
    }

    #[test]
    fn purchase_amount_is_the_exact_residual() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Stashed, COINS, 2000);
        world.set_quantity(StoreKind::Carried, COINS, 500);

        let steps = plan(&world, &[ItemRequest::new(COINS, 5000)]);
        // 5000 - 2000 stashed - 500 carried = 2500 bought, not a unit more.
        assert_eq!(
            steps.steps(),
            &[
                PlanStep::Purchase {
                    id: COINS,
                    quantity: 2500
                },
                PlanStep::DepositAllCarried,
                PlanStep::Withdraw {
                    id: COINS,
                    target: 5000
                },
            ]
        );
    }

    #[test]
    fn worn_stack_covers_shortfall_without_purchase() {
        let world = InMemoryWorld::new();
        // Wants 3 loose, has 1 stashed, 1 carried, 2 worn: the worn stack
        // covers the remaining 1 so nothing is bought.
        world.set_quantity(StoreKind::Stashed, SHIELD, 1);
        world.set_quantity(StoreKind::Carried, SHIELD, 1);
        world.set_quantity(StoreKind::Worn, SHIELD, 2);

        let steps = plan(&world, &[ItemRequest::new(SHIELD, 3)]);
        assert_eq!(
            steps.steps(),
            &[
                PlanStep::RemoveFromWorn {
                    id: SHIELD,
                    quantity: 2
                },
                PlanStep::DepositAllCarried,
                PlanStep::Withdraw {
                    id: SHIELD,
                    target: 3
                },
            ]
        );
    }

    #[test]
    fn worn_shortfall_purchases_only_what_the_removal_misses() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Worn, SHIELD, 1);

        let steps = plan(&world, &[ItemRequest::new(SHIELD, 4)]);
        // needed = 4, removal frees 1, purchase covers the remaining 3.
        assert_eq!(
            steps.steps(),
            &[
                PlanStep::RemoveFromWorn {
                    id: SHIELD,
                    quantity: 1
                },
                PlanStep::Purchase {
                    id: SHIELD,
                    quantity: 3
                },
                PlanStep::DepositAllCarried,
                PlanStep::Withdraw {
                    id: SHIELD,
                    target: 4
                },
            ]
        );
    }

    #[test]
    fn phases_stay_ordered_across_items() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Worn, SWORD, 1);

        let requests = [ItemRequest::new(SWORD, 2), ItemRequest::new(COINS, 100)];
        let steps = plan(&world, &requests);

        let kinds: Vec<u8> = steps
            .steps()
            .iter()
            .map(|s| match s {
                PlanStep::RemoveFromWorn { .. } => 0,
                PlanStep::Purchase { .. } => 1,
                PlanStep::DepositAllCarried => 2,
                PlanStep::Withdraw { .. } => 3,
            })
            .collect();
        let mut sorted = kinds.clone();
        sorted.sort_unstable();
        assert_eq!(kinds, sorted, "phases must not interleave");
    }

    #[test]
    fn duplicate_ids_are_planned_independently() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Stashed, COINS, 2000);

        let requests = [ItemRequest::new(COINS, 5000), ItemRequest::new(COINS, 100)];
        let steps = plan(&world, &requests);

        // First entry buys its own residual; the second is stash-covered.
        assert_eq!(steps.purchases().collect::<Vec<_>>(), vec![(COINS, 3000)]);
        assert_eq!(
            steps.withdrawals().collect::<Vec<_>>(),
            vec![(COINS, 5000), (COINS, 100)]
        );
    }

    #[test]
    fn satisfied_carried_request_still_gets_a_withdraw_target() {
        let world = InMemoryWorld::new();
        world.set_quantity(StoreKind::Carried, COINS, 100);

        // The carried stack is deposited by normalization, so a withdraw
        // step must restore it to exactly the requested amount.
        let requests = [ItemRequest::new(COINS, 100), ItemRequest::new(SWORD, 1)];
        let steps = plan(&world, &requests);
        assert_eq!(
            steps.withdrawals().collect::<Vec<_>>(),
            vec![(COINS, 100), (SWORD, 1)]
        );
    }
}
