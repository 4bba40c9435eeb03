//! Tick clock, polling wait, and resource fulfillment for the Wayfarer agent.
//!
//! This crate owns the engine that guarantees a scripted agent ends up
//! holding the items a behavior asks for, sourcing shortfalls from the
//! stash and falling back to marketplace purchase, with every world
//! mutation confirmed by polling against an externally ticked world.
//!
//! # Modules
//!
//! - [`clock`] -- [`TickDriver`] and [`TickStream`], the externally-driven
//!   tick channel every wait suspends on.
//! - [`wait`] -- The polling-wait primitive: one condition sample per tick,
//!   bounded or unbounded, with a typed [`WaitOutcome`].
//! - [`store`] -- [`StoreView`], read-only store queries and the
//!   sufficiency predicates.
//! - [`planner`] -- The pure shortfall planner.
//! - [`fulfill`] -- [`Fulfillment`], the orchestrator exposing `ensure`
//!   and `equip`.
//! - [`config`] -- Per-step tick budgets loaded from YAML.
//! - [`error`] -- [`FulfillmentError`] and the step taxonomy.
//!
//! [`TickDriver`]: clock::TickDriver
//! [`TickStream`]: clock::TickStream
//! [`WaitOutcome`]: wait::WaitOutcome
//! [`StoreView`]: store::StoreView
//! [`Fulfillment`]: fulfill::Fulfillment
//! [`FulfillmentError`]: error::FulfillmentError

pub mod clock;
pub mod config;
pub mod error;
pub mod fulfill;
pub mod planner;
pub mod store;
pub mod wait;

pub use clock::{ClockError, TickDriver, TickStream};
pub use config::{ConfigError, FulfillConfig};
pub use error::{FulfillmentError, StepKind};
pub use fulfill::Fulfillment;
pub use planner::plan;
pub use store::StoreView;
pub use wait::{WaitOutcome, wait_until};
