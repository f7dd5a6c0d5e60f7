//! The stochastic inputs of the engine, behind the `RandomProcess` trait.
//!
//! The engine only ever asks two questions: "does a customer arrive this
//! tick?" and "how long will this service take?".  Production runs answer
//! them with [`StochasticProcess`]; boundary-condition tests answer them with
//! [`ScriptedProcess`] so no test depends on statistical convergence.

use std::collections::{BTreeSet, VecDeque};

use bx_core::{RunConfig, SimRng, Tick};
use rand_distr::{Distribution, Normal};

use crate::{SimError, SimResult};

/// Source of arrivals and service durations.
pub trait RandomProcess {
    /// Called exactly once per tick while arrivals are open.
    fn try_arrival(&mut self, now: Tick) -> bool;

    /// Called once per assignment.  Must return at least one tick.
    fn sample_service_duration(&mut self) -> u64;
}

impl<P: RandomProcess + ?Sized> RandomProcess for Box<P> {
    fn try_arrival(&mut self, now: Tick) -> bool {
        (**self).try_arrival(now)
    }

    fn sample_service_duration(&mut self) -> u64 {
        (**self).sample_service_duration()
    }
}

/// Truncate a real-valued sample to whole ticks, flooring anything below
/// `floor` (including negative and non-finite samples) to `floor`.
pub fn floor_sample(sample: f64, floor: u64) -> u64 {
    if sample.is_finite() && sample >= floor as f64 {
        sample as u64
    } else {
        floor
    }
}

// ── StochasticProcess ─────────────────────────────────────────────────────────

/// Bernoulli arrivals and normally distributed service times.
///
/// Arrivals and service times draw from two child streams of the run seed, so
/// the arrival pattern of a seed doesn't change with the number of counters.
pub struct StochasticProcess {
    arrival_rng:         SimRng,
    service_rng:         SimRng,
    arrival_probability: f64,
    service:             Normal<f64>,
    floor_ticks:         u64,
}

impl StochasticProcess {
    /// Fails with `BxError::Config` on an invalid configuration, before any
    /// distribution is built.
    pub fn new(config: &RunConfig) -> SimResult<Self> {
        config.validate()?;
        let service = Normal::new(config.service_mean_ticks, config.service_std_dev_ticks)
            .map_err(|e| SimError::Distribution(e.to_string()))?;
        let mut root = SimRng::new(config.seed);
        Ok(Self {
            arrival_rng:         root.child(0),
            service_rng:         root.child(1),
            arrival_probability: config.arrival_probability,
            service,
            floor_ticks:         config.service_floor_ticks.max(1),
        })
    }
}

impl RandomProcess for StochasticProcess {
    fn try_arrival(&mut self, _now: Tick) -> bool {
        self.arrival_rng.gen_bool(self.arrival_probability)
    }

    fn sample_service_duration(&mut self) -> u64 {
        let sample = self.service.sample(self.service_rng.inner());
        floor_sample(sample, self.floor_ticks)
    }
}

// ── ScriptedProcess ───────────────────────────────────────────────────────────

/// Deterministic process: arrivals at listed ticks, durations from a list.
///
/// Once the duration list is exhausted every further sample returns the
/// fallback duration.
///
/// ```rust,ignore
/// let process = ScriptedProcess::new(600)
///     .arrive_at([0, 3])
///     .durations([5, 7]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedProcess {
    arrivals:  BTreeSet<Tick>,
    durations: VecDeque<u64>,
    fallback:  u64,
    trials:    u64,
}

impl ScriptedProcess {
    pub fn new(fallback: u64) -> Self {
        Self {
            fallback: fallback.max(1),
            ..Self::default()
        }
    }

    /// Make one customer arrive at each of `ticks`.
    pub fn arrive_at(mut self, ticks: impl IntoIterator<Item = u64>) -> Self {
        self.arrivals.extend(ticks.into_iter().map(Tick));
        self
    }

    /// Queue service durations, handed out in assignment order.
    pub fn durations(mut self, durations: impl IntoIterator<Item = u64>) -> Self {
        self.durations.extend(durations);
        self
    }

    /// How many arrival trials the engine has made.
    pub fn trials(&self) -> u64 {
        self.trials
    }
}

impl RandomProcess for ScriptedProcess {
    fn try_arrival(&mut self, now: Tick) -> bool {
        self.trials += 1;
        self.arrivals.contains(&now)
    }

    fn sample_service_duration(&mut self) -> u64 {
        self.durations.pop_front().unwrap_or(self.fallback).max(1)
    }
}
