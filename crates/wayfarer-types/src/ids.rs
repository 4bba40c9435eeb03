//! Type-safe identifier for fungible item kinds.
//!
//! Item identities are the stable numeric keys the world protocol uses for
//! item definitions. They are not display names: two items with the same
//! name but different keys are different kinds, and the engine never
//! compares names.

use serde::{Deserialize, Serialize};

/// Opaque stable key identifying a fungible item kind.
///
/// Wraps the raw protocol key so that item identities cannot be mixed with
/// other integers (quantities, tick counts) at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Create an item identity from its raw protocol key.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw protocol key.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<ItemId> for u32 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
