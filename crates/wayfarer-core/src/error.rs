//! Error types for the fulfillment engine.
//!
//! All failure originates in confirmation polling or in the equip-verb
//! lookup; the planner itself never fails. Failures carry which step and
//! which item so a caller can decide whether to retry the whole call,
//! abort the script, or ask for operator attention. The engine never rolls
//! back: the world has no transaction concept, so partial progress stays
//! committed and a retry re-derives the remaining work.

use wayfarer_types::ItemId;

use crate::clock::ClockError;

/// The mutating step a confirmation wait was guarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Opening the stash interface.
    OpenStash,
    /// Removing a worn item into Carried.
    RemoveWorn,
    /// Marketplace purchase settlement.
    Purchase,
    /// Depositing all carried items into the stash.
    Deposit,
    /// Withdrawing an exact amount from the stash.
    Withdraw,
    /// Putting an item on.
    Equip,
}

impl StepKind {
    /// Short human-readable name of the step.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenStash => "open-stash",
            Self::RemoveWorn => "remove-worn",
            Self::Purchase => "purchase",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Equip => "equip",
        }
    }
}

impl core::fmt::Display for StepKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by `ensure` and `equip`.
#[derive(Debug, thiserror::Error)]
pub enum FulfillmentError {
    /// A bounded confirmation wait exhausted its tick budget.
    ///
    /// Recoverable: committed steps stay committed, and retrying the whole
    /// call re-derives only the still-missing work.
    #[error("timed out waiting for {step} to be reflected by the world{}", fmt_item(*id))]
    Timeout {
        /// The step whose effect never became observable.
        step: StepKind,
        /// The item the step was acting on, when the step has one.
        id: Option<ItemId>,
    },

    /// The item's metadata advertises none of the recognized equip verbs.
    ///
    /// Fatal for that item; not retriable without operator correction.
    #[error("item {0} has no recognized equip verb")]
    NoEquipVerb(ItemId),

    /// The tick source shut down while a confirmation wait was suspended.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Format the optional item suffix of a timeout message.
fn fmt_item(id: Option<ItemId>) -> String {
    id.map(|id| format!(" (item {id})")).unwrap_or_default()
}
