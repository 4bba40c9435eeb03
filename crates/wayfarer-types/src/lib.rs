//! Shared type definitions for the Wayfarer fulfillment engine.
//!
//! This crate is the single source of truth for the types that flow between
//! the world interface, the acquisition planner, and the fulfillment
//! orchestrator.
//!
//! # Modules
//!
//! - [`ids`] -- The [`ItemId`] key type for fungible item kinds
//! - [`enums`] -- Store kinds, equip verbs, and navigation areas
//! - [`items`] -- Item request and snapshot stack types
//! - [`plan`] -- Shortfall plan steps produced by the planner

pub mod enums;
pub mod ids;
pub mod items;
pub mod plan;

// Re-export all public types at crate root for convenience.
pub use enums::{Area, EquipVerb, StoreKind};
pub use ids::ItemId;
pub use items::{ItemRequest, ItemStack};
pub use plan::{PlanStep, ShortfallPlan};
