//! World interface traits and in-memory double for the Wayfarer engine.
//!
//! The live game is a process-external simulation the engine can only
//! observe and send commands to. This crate defines that seam as two
//! explicit traits -- [`WorldView`] for reads and [`WorldActions`] for
//! fire-and-forget command issuance -- so every component receives an
//! injected world value instead of touching ambient global state.
//!
//! # Modules
//!
//! - [`view`] -- [`WorldView`], the read-only snapshot interface
//! - [`actions`] -- [`WorldActions`], the mutation-request interface
//! - [`memory`] -- [`InMemoryWorld`], a deterministic double with
//!   configurable effect latency in ticks

pub mod actions;
pub mod memory;
pub mod view;

pub use actions::WorldActions;
pub use memory::InMemoryWorld;
pub use view::WorldView;
