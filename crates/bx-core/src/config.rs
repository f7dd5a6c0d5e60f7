//! Run configuration.
//!
//! `RunConfig` is owned by the application (CLI, tests) and handed to the
//! simulation builder, which calls [`RunConfig::validate`] before any tick
//! runs.  Every default mirrors the 08:00–12:00 service window of the
//! modelled office.

use crate::time::DEFAULT_OPENING_SECS;
use crate::{BxError, BxResult, SimClock, Tick};

/// Largest accepted number of counters.
pub const MAX_COUNTERS: usize = 10;

/// Which phase wins when a waiting customer is eligible for assignment on the
/// same tick its patience runs out.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Assignment runs before the abandonment check: a customer reaching the
    /// threshold on the tick a counter frees up is served.
    #[default]
    AssignFirst,
    /// Abandonment runs before assignment: that customer leaves instead.
    AbandonFirst,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Number of parallel counters, `1..=MAX_COUNTERS`.
    pub counters: usize,

    /// Ticks during which arrivals are possible.  4 h at 1 s/tick = 14 400.
    pub horizon_ticks: u64,

    /// Per-tick arrival probability.
    pub arrival_probability: f64,

    /// Mean of the normal service-time distribution, in ticks.
    pub service_mean_ticks: f64,

    /// Standard deviation of the service-time distribution, in ticks.
    pub service_std_dev_ticks: f64,

    /// Smallest service duration ever assigned; lower samples are floored.
    pub service_floor_ticks: u64,

    /// Waiting ticks after which a customer abandons (inclusive).
    pub patience_ticks: u64,

    /// Fixed cost charged per counter for the run.
    pub cost_per_counter: u64,

    /// Loss charged per abandoning customer.
    pub loss_per_abandonment: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Seconds after midnight of tick 0, used only for clock rendering.
    pub opening_secs: u32,

    /// Emit a snapshot every N ticks.  1 = every tick.
    pub snapshot_interval_ticks: u64,

    pub boundary_policy: BoundaryPolicy,

    /// Keep stepping past the horizon, without new arrivals, until nobody is
    /// waiting or in service.
    pub drain_after_close: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            counters:                1,
            horizon_ticks:           4 * 3_600,
            arrival_probability:     1.0 / 144.0,
            service_mean_ticks:      600.0,
            service_std_dev_ticks:   300.0,
            service_floor_ticks:     1,
            patience_ticks:          1_800,
            cost_per_counter:        1_000,
            loss_per_abandonment:    10_000,
            seed:                    0,
            opening_secs:            DEFAULT_OPENING_SECS,
            snapshot_interval_ticks: 1,
            boundary_policy:         BoundaryPolicy::AssignFirst,
            drain_after_close:       false,
        }
    }
}

impl RunConfig {
    /// Default configuration with `counters` counters.
    pub fn with_counters(counters: usize) -> Self {
        Self { counters, ..Self::default() }
    }

    /// Reject any configuration the engine cannot run.
    pub fn validate(&self) -> BxResult<()> {
        if !(1..=MAX_COUNTERS).contains(&self.counters) {
            return Err(BxError::CounterCount(self.counters));
        }
        if self.horizon_ticks == 0 {
            return Err(BxError::Config("horizon must be at least one tick".into()));
        }
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return Err(BxError::Config(format!(
                "arrival probability {} is outside [0, 1]",
                self.arrival_probability
            )));
        }
        if !self.service_mean_ticks.is_finite() || self.service_mean_ticks < 0.0 {
            return Err(BxError::Config(format!(
                "service mean {} must be finite and non-negative",
                self.service_mean_ticks
            )));
        }
        if !self.service_std_dev_ticks.is_finite() || self.service_std_dev_ticks < 0.0 {
            return Err(BxError::Config(format!(
                "service standard deviation {} must be finite and non-negative",
                self.service_std_dev_ticks
            )));
        }
        if self.service_floor_ticks == 0 {
            return Err(BxError::Config("service floor must be at least one tick".into()));
        }
        if self.patience_ticks == 0 {
            return Err(BxError::Config("patience threshold must be at least one tick".into()));
        }
        if self.snapshot_interval_ticks == 0 {
            return Err(BxError::Config("snapshot interval must be at least one tick".into()));
        }
        Ok(())
    }

    /// The tick at which arrivals stop (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.opening_secs)
    }
}
