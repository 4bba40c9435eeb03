//! Shortfall plan steps produced by the acquisition planner.
//!
//! A [`ShortfallPlan`] is an ordered list of world mutations that, once
//! confirmed, leave the agent carrying everything a request list asked for.
//! Phases are strictly ordered (remove-worn, purchase, deposit-all,
//! withdraw-exact) because later phases depend on earlier phases' effects
//! being visible in the world snapshot. Steps for different items within
//! one phase carry no ordering guarantee relative to each other.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// One step of a shortfall plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStep {
    /// Unequip a worn item so its quantity becomes loose and depositable.
    ///
    /// Emitted only when the item's presence alone is insufficient and the
    /// same item is also needed as a carryable unit.
    RemoveFromWorn {
        /// The worn item to remove.
        id: ItemId,
        /// The worn quantity freed by the removal.
        quantity: u32,
    },

    /// Buy the residual shortfall from the marketplace.
    ///
    /// Purchase is assumed to succeed at the requested quantity or better;
    /// the engine does not model partial fills or price limits.
    Purchase {
        /// The item to buy.
        id: ItemId,
        /// The exact residual quantity to buy.
        quantity: u32,
    },

    /// Deposit every loose carried item into the stash.
    ///
    /// Normalization: after this step the stash is canonical and the
    /// withdraw phase can extract exact amounts.
    DepositAllCarried,

    /// Withdraw until the carried quantity reaches `target`.
    ///
    /// The amount actually withdrawn is recomputed from a fresh snapshot at
    /// execution time, so re-running a plan after partial progress only
    /// withdraws what is still missing.
    Withdraw {
        /// The item to withdraw.
        id: ItemId,
        /// The carried quantity to reach.
        target: u32,
    },
}

/// An ordered list of plan steps.
///
/// Produced by the planner as pure computation over store snapshots; the
/// planner never fails and a plan may be empty (nothing to do).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallPlan {
    steps: Vec<PlanStep>,
}

impl ShortfallPlan {
    /// Create an empty plan.
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step to the plan.
    pub fn push(&mut self, step: PlanStep) {
        self.steps.push(step);
    }

    /// The steps in execution order.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Whether the plan contains no steps at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the purchase steps (in plan order).
    pub fn purchases(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Purchase { id, quantity } => Some((*id, *quantity)),
            _ => None,
        })
    }

    /// Iterate over the withdraw steps (in plan order).
    pub fn withdrawals(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Withdraw { id, target } => Some((*id, *target)),
            _ => None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_has_no_steps() {
        let plan = ShortfallPlan::new();
        assert!(plan.is_empty());
        assert!(plan.steps().is_empty());
    }

    #[test]
    fn steps_keep_insertion_order() {
        let coins = ItemId::new(995);
        let mut plan = ShortfallPlan::new();
        plan.push(PlanStep::Purchase {
            id: coins,
            quantity: 3000,
        });
        plan.push(PlanStep::DepositAllCarried);
        plan.push(PlanStep::Withdraw {
            id: coins,
            target: 5000,
        });

        assert_eq!(plan.steps().len(), 3);
        assert_eq!(
            plan.steps().first(),
            Some(&PlanStep::Purchase {
                id: coins,
                quantity: 3000
            })
        );
        assert_eq!(plan.purchases().collect::<Vec<_>>(), vec![(coins, 3000)]);
        assert_eq!(plan.withdrawals().collect::<Vec<_>>(), vec![(coins, 5000)]);
    }

    #[test]
    fn serde_round_trip() {
        let mut plan = ShortfallPlan::new();
        plan.push(PlanStep::RemoveFromWorn {
            id: ItemId::new(1227),
            quantity: 1,
        });
        plan.push(PlanStep::DepositAllCarried);

        let json = serde_json::to_string(&plan).unwrap();
        let back: ShortfallPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
