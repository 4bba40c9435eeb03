//! The polling-wait primitive every multi-tick action relies on.
//!
//! The world offers no push notifications: the only way to learn that a
//! stash opened, an item arrived, or an animation finished is to sample the
//! world again after the next tick. [`wait_until`] is that loop made
//! explicit -- it samples the condition once, and while the condition is
//! false, suspends until the next external tick and resamples. One sample
//! per tick, never a busy spin.
//!
//! The bounded variant gives up after `budget` samples with a typed
//! [`WaitOutcome::TimedOut`]; giving up never unwinds already-committed
//! world mutations. The unbounded variant (`budget = None`) suspends
//! indefinitely and is reserved for conditions whose failure to converge
//! means the session is unrecoverable and needs manual intervention.

use crate::clock::{ClockError, TickStream};

/// The typed result of a polling wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition became true.
    Ready {
        /// How many samples were taken, counting the immediate first one.
        samples: u64,
    },
    /// The sample budget was exhausted with the condition still false.
    TimedOut {
        /// How many samples were taken.
        samples: u64,
    },
}

impl WaitOutcome {
    /// Whether the condition became true.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Sample `condition` once per external tick until it is true.
///
/// The condition is sampled immediately before any suspension, so a
/// condition that already holds completes without consuming a tick. With
/// `budget = Some(n)`, at most `n` samples are taken before the wait gives
/// up with [`WaitOutcome::TimedOut`]. With `budget = None` the wait
/// suspends until the condition holds, however long that takes.
///
/// # Errors
///
/// Returns [`ClockError::Stopped`] if the tick driver is dropped while the
/// wait is suspended.
pub async fn wait_until<F>(
    ticks: &mut TickStream,
    budget: Option<u64>,
    mut condition: F,
) -> Result<WaitOutcome, ClockError>
where
    F: FnMut() -> bool,
{
    let mut samples: u64 = 0;
    loop {
        samples = samples.saturating_add(1);
        if condition() {
            return Ok(WaitOutcome::Ready { samples });
        }
        if let Some(max) = budget {
            if samples >= max {
                return Ok(WaitOutcome::TimedOut { samples });
            }
        }
        let _tick = ticks.next_tick().await?;
    }
}
