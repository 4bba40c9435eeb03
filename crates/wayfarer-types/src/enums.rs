//! Enumeration types for the Wayfarer fulfillment engine.
//!
//! Store kinds partition where an item can live, equip verbs are the
//! capability set an item advertises for being put on, and areas are the
//! navigation targets the engine walks to before mutating a remote store.

use serde::{Deserialize, Serialize};

/// A store an item quantity can be observed in.
///
/// `Worn` and `Carried` are mutually exclusive partitions of what the agent
/// has on hand. `Stashed` is the remote, order-preserving container used as
/// the canonical intermediary during reconciliation. `Market` is an external
/// unbounded purchase source; nothing in it is owned by the agent until
/// bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    /// Items actively equipped on the agent.
    Worn,
    /// Loose items the agent holds but has not equipped.
    Carried,
    /// The remote persistent container (bank-like, finite slots).
    Stashed,
    /// The external unbounded purchase source.
    Market,
}

/// A recognized "put on" interaction verb.
///
/// Exactly three verbs are recognized by the world protocol. An item whose
/// metadata advertises none of them cannot be equipped at all; the engine
/// treats that as an unrecoverable configuration error rather than probing
/// further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipVerb {
    /// Weapons and held implements.
    Wield,
    /// Armour and clothing.
    Wear,
    /// Generic equipment slot items.
    Equip,
}

impl EquipVerb {
    /// The protocol name of the verb as it appears in an item's action list.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wield => "Wield",
            Self::Wear => "Wear",
            Self::Equip => "Equip",
        }
    }
}

impl core::fmt::Display for EquipVerb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigation target the engine may need to reach before acting.
///
/// Navigation itself is an external collaborator; the engine only names
/// where it needs to be, and `walk_to` blocks until the agent is there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    /// The nearest stash access point.
    Stash,
    /// The marketplace.
    Market,
}
