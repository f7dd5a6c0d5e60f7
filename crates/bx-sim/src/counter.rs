//! The `Counter` state machine.
//!
//! ```text
//!            assign(customer, d)
//!   Idle ─────────────────────────▶ Busy { remaining = d }
//!    ▲                                │
//!    └──── tick() with remaining → 0 ─┘   (yields the served customer)
//! ```
//!
//! A counter never decrements on the tick it was assigned, so a customer
//! assigned at `t` with duration `d` is released at exactly `t + d`.

use bx_core::{CounterId, CustomerId, Tick};

use crate::{SimError, SimResult};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterState {
    Idle,
    Busy,
}

/// One service station.
#[derive(Clone, Debug)]
pub struct Counter {
    id:         CounterId,
    occupant:   Option<CustomerId>,
    remaining:  u64,
    /// Tick of the current assignment (meaningless while idle).
    since:      Tick,
    /// The counter takes no customers before this tick.
    opens_at:   Tick,
    /// Lifetime totals, for utilisation reporting.
    busy_ticks: u64,
    served:     u64,
}

impl Counter {
    pub fn new(id: CounterId) -> Self {
        Self {
            id,
            occupant:   None,
            remaining:  0,
            since:      Tick::ZERO,
            opens_at:   Tick::ZERO,
            busy_ticks: 0,
            served:     0,
        }
    }

    pub(crate) fn set_opens_at(&mut self, tick: Tick) {
        self.opens_at = tick;
    }

    #[inline]
    pub fn id(&self) -> CounterId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> CounterState {
        if self.occupant.is_some() { CounterState::Busy } else { CounterState::Idle }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.occupant.is_none()
    }

    /// Idle and open for business at `now`.
    #[inline]
    pub fn is_available(&self, now: Tick) -> bool {
        self.is_idle() && now >= self.opens_at
    }

    #[inline]
    pub fn occupant(&self) -> Option<CustomerId> {
        self.occupant
    }

    /// Service ticks left for the occupant; `None` while idle.
    pub fn remaining(&self) -> Option<u64> {
        self.occupant.map(|_| self.remaining)
    }

    /// Ticks spent serving so far.
    pub fn busy_ticks(&self) -> u64 {
        self.busy_ticks
    }

    /// Customers released as served so far.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Idle → Busy.  A zero `duration` is treated as one tick.
    pub fn assign(&mut self, customer: CustomerId, duration: u64, now: Tick) -> SimResult<()> {
        if let Some(occupant) = self.occupant {
            return Err(SimError::CounterBusy { counter: self.id, occupant });
        }
        self.occupant  = Some(customer);
        self.remaining = duration.max(1);
        self.since     = now;
        Ok(())
    }

    /// Advance service by one tick.  Returns the customer whose service just
    /// finished, if any.  No-op while idle or on the assignment tick.
    pub fn tick(&mut self, now: Tick) -> Option<CustomerId> {
        let occupant = self.occupant?;
        if now <= self.since {
            return None;
        }
        self.remaining -= 1;
        self.busy_ticks += 1;
        if self.remaining > 0 {
            return None;
        }
        self.occupant = None;
        self.served += 1;
        Some(occupant)
    }
}
