//! Customer records and the arena that owns them.
//!
//! Every customer ever admitted lives in [`CustomerArena`] for the whole run,
//! indexed by its [`CustomerId`].  The waiting queue and the counters only
//! hold ids, so "who holds this customer" is always answerable from the
//! disposition alone:
//!
//! | Disposition | Held by                         |
//! |-------------|---------------------------------|
//! | `Waiting`   | the waiting queue               |
//! | `InService` | exactly one counter             |
//! | `Served`    | nobody (history only)           |
//! | `Abandoned` | nobody (history only)           |

use bx_core::{BxError, CounterId, CustomerId, Tick};

use crate::{SimError, SimResult};

/// Lifecycle state of a customer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disposition {
    Waiting,
    InService,
    Served,
    Abandoned,
}

impl Disposition {
    /// `Served` and `Abandoned` are never left again.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Disposition::Served | Disposition::Abandoned)
    }
}

/// One arrival and everything that happened to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    pub id:            CustomerId,
    /// Tick the customer joined the queue.
    pub arrival:       Tick,
    /// Tick service began; `None` if never served.
    pub assignment:    Option<Tick>,
    /// Tick service ended; `None` until served.
    pub completion:    Option<Tick>,
    /// Tick the customer gave up waiting.
    pub abandoned_at:  Option<Tick>,
    /// Counter that served (or is serving) the customer.
    pub counter:       Option<CounterId>,
    /// Service duration drawn at assignment.
    pub service_ticks: Option<u64>,
    pub disposition:   Disposition,
}

impl Customer {
    fn new(id: CustomerId, arrival: Tick) -> Self {
        Self {
            id,
            arrival,
            assignment:    None,
            completion:    None,
            abandoned_at:  None,
            counter:       None,
            service_ticks: None,
            disposition:   Disposition::Waiting,
        }
    }

    /// Ticks spent in the queue: until assignment, or until abandonment.
    pub fn wait_ticks(&self) -> Option<u64> {
        self.assignment
            .or(self.abandoned_at)
            .map(|end| end.since(self.arrival))
    }

    /// Ticks spent at the counter, once service has completed.
    pub fn service_time(&self) -> Option<u64> {
        match (self.assignment, self.completion) {
            (Some(start), Some(end)) => Some(end.since(start)),
            _ => None,
        }
    }

    fn ensure(&self, wanted: Disposition, action: &'static str) -> SimResult<()> {
        if self.disposition == wanted {
            Ok(())
        } else {
            Err(SimError::InvalidTransition {
                customer:    self.id,
                disposition: self.disposition,
                action,
            })
        }
    }

    /// Waiting → InService.
    pub(crate) fn begin_service(
        &mut self,
        now:      Tick,
        counter:  CounterId,
        duration: u64,
    ) -> SimResult<()> {
        self.ensure(Disposition::Waiting, "begin service")?;
        self.assignment    = Some(now);
        self.counter       = Some(counter);
        self.service_ticks = Some(duration);
        self.disposition   = Disposition::InService;
        Ok(())
    }

    /// InService → Served.
    pub(crate) fn complete(&mut self, now: Tick) -> SimResult<()> {
        self.ensure(Disposition::InService, "complete service")?;
        self.completion  = Some(now);
        self.disposition = Disposition::Served;
        Ok(())
    }

    /// Waiting → Abandoned.
    pub(crate) fn abandon(&mut self, now: Tick) -> SimResult<()> {
        self.ensure(Disposition::Waiting, "abandon")?;
        self.abandoned_at = Some(now);
        self.disposition  = Disposition::Abandoned;
        Ok(())
    }
}

// ── CustomerArena ─────────────────────────────────────────────────────────────

/// Dense storage of all customers of one run, indexed by `CustomerId`.
///
/// Ids are handed out in arrival order, so iteration order is arrival order.
#[derive(Default, Debug)]
pub struct CustomerArena {
    records: Vec<Customer>,
}

impl CustomerArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Waiting` customer arriving at `now` and return its id.
    pub fn admit(&mut self, now: Tick) -> CustomerId {
        let id = CustomerId(self.records.len() as u32);
        self.records.push(Customer::new(id, now));
        id
    }

    #[inline]
    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.records.get(id.index())
    }

    /// Like [`get`][Self::get] but an unknown id is an error.
    pub fn lookup(&self, id: CustomerId) -> SimResult<&Customer> {
        self.get(id).ok_or(SimError::Core(BxError::CustomerNotFound(id)))
    }

    pub(crate) fn lookup_mut(&mut self, id: CustomerId) -> SimResult<&mut Customer> {
        self.records
            .get_mut(id.index())
            .ok_or(SimError::Core(BxError::CustomerNotFound(id)))
    }

    /// Number of customers ever admitted.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All customers in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.records.iter()
    }

    /// Customers in a terminal state, in arrival order.
    pub fn terminal(&self) -> impl Iterator<Item = &Customer> {
        self.records.iter().filter(|c| c.disposition.is_terminal())
    }

    /// Count of customers currently in `disposition`.
    pub fn count(&self, disposition: Disposition) -> usize {
        self.records.iter().filter(|c| c.disposition == disposition).count()
    }
}
