//! Patience rule for waiting customers.

use bx_core::{CustomerId, Tick};

use crate::{CustomerArena, SimResult, WaitingQueue};

/// Evicts waiting customers whose wait has reached the patience threshold.
///
/// The threshold is inclusive: a customer arriving at `a` with patience `p`
/// leaves at exactly `a + p`, provided it is still waiting then.
#[derive(Copy, Clone, Debug)]
pub struct AbandonmentMonitor {
    patience_ticks: u64,
}

impl AbandonmentMonitor {
    pub fn new(patience_ticks: u64) -> Self {
        Self { patience_ticks }
    }

    /// Has a customer that arrived at `arrival` run out of patience at `now`?
    #[inline]
    pub fn is_overdue(&self, arrival: Tick, now: Tick) -> bool {
        now.since(arrival) >= self.patience_ticks
    }

    /// Remove overdue customers from `queue` and mark them abandoned.
    pub fn evict(
        &self,
        now:       Tick,
        queue:     &mut WaitingQueue,
        customers: &mut CustomerArena,
    ) -> SimResult<Vec<CustomerId>> {
        let evicted = queue.remove_abandoned(now, self);
        for &id in &evicted {
            customers.lookup_mut(id)?.abandon(now)?;
        }
        Ok(evicted)
    }
}
