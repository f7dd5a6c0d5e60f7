//! Running statistics and the cost model.
//!
//! Min/max figures are `Option<MinMax>`: with no served customer there is no
//! minimum, and reporting `0` would be indistinguishable from a real
//! one-tick-floored service.

use bx_core::RunConfig;

use crate::Customer;

/// Smallest and largest value seen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMax {
    pub min: u64,
    pub max: u64,
}

impl MinMax {
    pub fn of(value: u64) -> Self {
        Self { min: value, max: value }
    }

    pub fn include(self, value: u64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

fn widen(range: &mut Option<MinMax>, value: u64) {
    *range = Some(match *range {
        Some(r) => r.include(value),
        None    => MinMax::of(value),
    });
}

// ── CostModel ─────────────────────────────────────────────────────────────────

/// `counters × per_counter + abandoned × per_abandonment`.
///
/// Every term saturates at `u64::MAX` rather than wrapping.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    pub per_counter:     u64,
    pub per_abandonment: u64,
}

impl CostModel {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            per_counter:     config.cost_per_counter,
            per_abandonment: config.loss_per_abandonment,
        }
    }

    pub fn evaluate(&self, counters: usize, abandoned: u64) -> CostBreakdown {
        let counter_cost     = (counters as u64).saturating_mul(self.per_counter);
        let abandonment_cost = abandoned.saturating_mul(self.per_abandonment);
        CostBreakdown {
            counters:    counter_cost,
            abandonment: abandonment_cost,
            total:       counter_cost.saturating_add(abandonment_cost),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Fixed staffing cost.
    pub counters:    u64,
    /// Lost business from customers who left.
    pub abandonment: u64,
    pub total:       u64,
}

// ── MetricsAccumulator ────────────────────────────────────────────────────────

/// Running aggregate, fed by the arrival, abandonment and completion phases.
#[derive(Clone, Debug, Default)]
pub struct MetricsAccumulator {
    arrived:             u64,
    served:              u64,
    abandoned:           u64,
    service:             Option<MinMax>,
    wait:                Option<MinMax>,
    total_service_ticks: u64,
    total_wait_ticks:    u64,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_arrival(&mut self) {
        self.arrived += 1;
    }

    pub fn record_abandonment(&mut self) {
        self.abandoned += 1;
    }

    /// Record a customer that has just been served.
    pub fn record_service(&mut self, customer: &Customer) {
        self.served += 1;
        if let Some(service) = customer.service_time() {
            widen(&mut self.service, service);
            self.total_service_ticks += service;
        }
        if let Some(wait) = customer.wait_ticks() {
            widen(&mut self.wait, wait);
            self.total_wait_ticks += wait;
        }
    }

    pub fn arrived(&self) -> u64 {
        self.arrived
    }

    pub fn served(&self) -> u64 {
        self.served
    }

    pub fn abandoned(&self) -> u64 {
        self.abandoned
    }

    /// Freeze the current totals, costing them for `counters` counters.
    pub fn summary(&self, cost: &CostModel, counters: usize) -> MetricsSummary {
        let mean = |total: u64| (self.served > 0).then(|| total as f64 / self.served as f64);
        MetricsSummary {
            arrived:            self.arrived,
            served:             self.served,
            abandoned:          self.abandoned,
            service_ticks:      self.service,
            wait_ticks:         self.wait,
            mean_service_ticks: mean(self.total_service_ticks),
            mean_wait_ticks:    mean(self.total_wait_ticks),
            cost:               cost.evaluate(counters, self.abandoned),
        }
    }
}

// ── MetricsSummary ────────────────────────────────────────────────────────────

/// Read-only view of the metrics at one point in time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSummary {
    pub arrived:            u64,
    pub served:             u64,
    pub abandoned:          u64,
    /// Min/max service duration among served customers.
    pub service_ticks:      Option<MinMax>,
    /// Min/max queue wait among served customers.
    pub wait_ticks:         Option<MinMax>,
    pub mean_service_ticks: Option<f64>,
    pub mean_wait_ticks:    Option<f64>,
    pub cost:               CostBreakdown,
}

impl MetricsSummary {
    #[inline]
    pub fn total_cost(&self) -> u64 {
        self.cost.total
    }

    /// Fraction of arrivals that were served.  `None` with no arrivals.
    pub fn service_rate(&self) -> Option<f64> {
        (self.arrived > 0).then(|| self.served as f64 / self.arrived as f64)
    }

    /// Fraction of arrivals that abandoned.  `None` with no arrivals.
    pub fn abandonment_rate(&self) -> Option<f64> {
        (self.arrived > 0).then(|| self.abandoned as f64 / self.arrived as f64)
    }
}
