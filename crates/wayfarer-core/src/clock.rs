//! The externally-driven world tick channel.
//!
//! The world advances in discrete, unpredictable steps the engine does not
//! control. Whatever drives the session (the client event loop in
//! production, the test harness in tests) owns a [`TickDriver`] and calls
//! [`advance`] once per world step; everything that needs to suspend until
//! the next step holds a [`TickStream`] subscribed to it.
//!
//! The channel carries only the tick number. Ticks may be observed
//! collapsed: a stream that was not polled across several advances sees a
//! single change to the latest tick, which is exactly the "each tick may or
//! may not reflect a prior action" contract the polling wait is built for.
//!
//! [`advance`]: TickDriver::advance

use std::sync::Arc;

use tokio::sync::watch;

/// Errors that can occur while waiting on the tick channel.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The tick driver was dropped while a wait was suspended on it.
    #[error("tick source stopped: driver dropped while a wait was suspended")]
    Stopped,
}

/// The sending side of the tick channel.
///
/// Cloning is cheap; all clones advance the same channel.
#[derive(Debug, Clone)]
pub struct TickDriver {
    tx: Arc<watch::Sender<u64>>,
}

impl TickDriver {
    /// Create a driver starting at tick 0.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Advance to the next tick and wake every suspended stream.
    ///
    /// Returns the new tick number. Saturates at `u64::MAX`.
    pub fn advance(&self) -> u64 {
        self.tx.send_modify(|tick| {
            *tick = tick.saturating_add(1);
        });
        *self.tx.borrow()
    }

    /// The current tick number.
    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Subscribe a new stream positioned at the current tick.
    pub fn subscribe(&self) -> TickStream {
        TickStream {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// The receiving side of the tick channel.
///
/// Each call to [`next_tick`] suspends until the driver advances past the
/// last tick this stream observed, then returns the latest tick number.
///
/// [`next_tick`]: TickStream::next_tick
#[derive(Debug)]
pub struct TickStream {
    rx: watch::Receiver<u64>,
}

impl TickStream {
    /// Suspend until the next external tick and return its number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Stopped`] if the driver was dropped.
    pub async fn next_tick(&mut self) -> Result<u64, ClockError> {
        self.rx
            .changed()
            .await
            .map_err(|_err| ClockError::Stopped)?;
        Ok(*self.rx.borrow_and_update())
    }

    /// The latest tick number the channel holds (without suspending).
    pub fn current(&self) -> u64 {
        *self.rx.borrow()
    }
}
