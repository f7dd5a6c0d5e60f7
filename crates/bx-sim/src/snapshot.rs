//! Immutable end-of-tick views handed to renderers and reporters.

use bx_core::{CounterId, CustomerId, Tick};

use crate::{CounterState, MetricsSummary, WaitingEntry};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterView {
    pub id:              CounterId,
    pub state:           CounterState,
    pub occupant:        Option<CustomerId>,
    pub remaining_ticks: Option<u64>,
}

/// Engine state after all phases of `tick` have run.
///
/// Owns its data: holding on to a snapshot never borrows the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick:     Tick,
    /// One entry per counter, ascending id.
    pub counters: Vec<CounterView>,
    /// Waiting customers, head of the queue first.
    pub waiting:  Vec<WaitingEntry>,
    pub metrics:  MetricsSummary,
}

impl Snapshot {
    pub fn busy_count(&self) -> usize {
        self.counters
            .iter()
            .filter(|c| c.state == CounterState::Busy)
            .count()
    }

    #[inline]
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }
}
