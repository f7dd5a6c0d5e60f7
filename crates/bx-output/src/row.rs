//! Plain data row types written by output backends.

use bx_core::SimClock;
use bx_sim::{Customer, Disposition, RunResult, Snapshot};

/// Queue and counter occupancy at one emitted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    /// `HH:MM:SS` relative to the opening time.
    pub wall_time: String,
    pub waiting:   u64,
    pub busy:      u64,
    pub arrived:   u64,
    pub served:    u64,
    pub abandoned: u64,
}

impl TickSummaryRow {
    pub fn from_snapshot(snapshot: &Snapshot, clock: &SimClock) -> Self {
        Self {
            tick:      snapshot.tick.0,
            wall_time: clock.wall_time(snapshot.tick),
            waiting:   snapshot.waiting_count() as u64,
            busy:      snapshot.busy_count() as u64,
            arrived:   snapshot.metrics.arrived,
            served:    snapshot.metrics.served,
            abandoned: snapshot.metrics.abandoned,
        }
    }
}

/// Lifecycle of one terminal customer.  Unset ticks are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub customer_id:  u32,
    pub disposition:  &'static str,
    pub arrival:      u64,
    pub assignment:   Option<u64>,
    pub completion:   Option<u64>,
    pub abandoned_at: Option<u64>,
    pub counter_id:   Option<u8>,
    pub wait_ticks:   Option<u64>,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            customer_id:  c.id.0,
            disposition:  match c.disposition {
                Disposition::Waiting   => "waiting",
                Disposition::InService => "in_service",
                Disposition::Served    => "served",
                Disposition::Abandoned => "abandoned",
            },
            arrival:      c.arrival.0,
            assignment:   c.assignment.map(|t| t.0),
            completion:   c.completion.map(|t| t.0),
            abandoned_at: c.abandoned_at.map(|t| t.0),
            counter_id:   c.counter.map(|id| id.0),
            wait_ticks:   c.wait_ticks(),
        }
    }
}

/// The headline figures of a run.  Min/max are `None` without served
/// customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummaryRow {
    pub counters:         u64,
    pub ticks_run:        u64,
    pub arrived:          u64,
    pub served:           u64,
    pub abandoned:        u64,
    pub min_service:      Option<u64>,
    pub max_service:      Option<u64>,
    pub min_wait:         Option<u64>,
    pub max_wait:         Option<u64>,
    pub counter_cost:     u64,
    pub abandonment_cost: u64,
    pub total_cost:       u64,
}

impl From<&RunResult> for RunSummaryRow {
    fn from(r: &RunResult) -> Self {
        let m = &r.metrics;
        Self {
            counters:         r.counters as u64,
            ticks_run:        r.ticks_run,
            arrived:          m.arrived,
            served:           m.served,
            abandoned:        m.abandoned,
            min_service:      m.service_ticks.map(|s| s.min),
            max_service:      m.service_ticks.map(|s| s.max),
            min_wait:         m.wait_ticks.map(|w| w.min),
            max_wait:         m.wait_ticks.map(|w| w.max),
            counter_cost:     m.cost.counters,
            abandonment_cost: m.cost.abandonment,
            total_cost:       m.cost.total,
        }
    }
}
