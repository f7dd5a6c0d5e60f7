//! `WaitingQueue`: FIFO of customers not yet assigned to a counter.
//!
//! Customers are enqueued at their arrival tick, one tick at a time, so the
//! queue is always sorted by arrival.  The only ways out are popping the head
//! (assignment) and abandonment, which preserves that order.

use std::collections::VecDeque;

use bx_core::{CustomerId, Tick};

use crate::{AbandonmentMonitor, Customer};

/// A queued customer together with the arrival tick the queue needs for its
/// own decisions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitingEntry {
    pub customer: CustomerId,
    pub arrival:  Tick,
}

#[derive(Default, Debug)]
pub struct WaitingQueue {
    inner: VecDeque<WaitingEntry>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `customer` at the tail.
    pub fn enqueue(&mut self, customer: &Customer) {
        debug_assert!(!self.contains(customer.id), "{} queued twice", customer.id);
        debug_assert!(
            self.inner.back().is_none_or(|last| last.arrival <= customer.arrival),
            "queue must stay in arrival order",
        );
        self.inner.push_back(WaitingEntry {
            customer: customer.id,
            arrival:  customer.arrival,
        });
    }

    /// The customer who has waited longest.
    #[inline]
    pub fn peek_earliest(&self) -> Option<&WaitingEntry> {
        self.inner.front()
    }

    pub fn pop_earliest(&mut self) -> Option<CustomerId> {
        self.inner.pop_front().map(|e| e.customer)
    }

    /// Remove every customer that `monitor` considers overdue at `now`.
    ///
    /// Returned ids are in arrival order.  Since the queue is sorted by
    /// arrival, overdue customers always form a prefix.
    pub fn remove_abandoned(&mut self, now: Tick, monitor: &AbandonmentMonitor) -> Vec<CustomerId> {
        let mut removed = Vec::new();
        while let Some(head) = self.inner.front() {
            if !monitor.is_overdue(head.arrival, now) {
                break;
            }
            removed.push(head.customer);
            self.inner.pop_front();
        }
        removed
    }

    pub fn contains(&self, customer: CustomerId) -> bool {
        self.inner.iter().any(|e| e.customer == customer)
    }

    /// Queued customers, head first.
    pub fn iter(&self) -> impl Iterator<Item = &WaitingEntry> {
        self.inner.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
