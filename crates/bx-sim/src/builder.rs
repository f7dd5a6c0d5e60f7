//! Fluent builder for constructing a [`Sim`].

use bx_core::{BxError, CounterId, RunConfig, Tick};

use crate::{
    AbandonmentMonitor, CostModel, Counter, CustomerArena, MetricsAccumulator, RandomProcess,
    Sim, SimResult, StochasticProcess, WaitingQueue,
};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`RunConfig`]: counters, horizon, probabilities, costs, seed, …
/// - `P: RandomProcess`: arrival and service-time source
///
/// # Optional inputs (have defaults)
///
/// | Method                          | Default                   |
/// |---------------------------------|---------------------------|
/// | `.counter_opens_at(id, tick)`   | Every counter opens at 0  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::stochastic(RunConfig::with_counters(3))?
///     .counter_opens_at(CounterId(3), Tick(3_600))
///     .build()?;
/// let result = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: RandomProcess> {
    config:   RunConfig,
    process:  P,
    opens_at: Vec<(CounterId, Tick)>,
}

impl SimBuilder<StochasticProcess> {
    /// Builder driven by the seeded [`StochasticProcess`] for `config`.
    pub fn stochastic(config: RunConfig) -> SimResult<Self> {
        config.validate()?;
        let process = StochasticProcess::new(&config)?;
        Ok(Self::new(config, process))
    }
}

impl<P: RandomProcess> SimBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: RunConfig, process: P) -> Self {
        Self {
            config,
            process,
            opens_at: Vec::new(),
        }
    }

    /// Keep counter `id` closed until `tick`.  It still counts towards the
    /// fixed counter cost.
    pub fn counter_opens_at(mut self, id: CounterId, tick: Tick) -> Self {
        self.opens_at.push((id, tick));
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`] at tick 0.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let mut counters: Vec<Counter> = (0..self.config.counters)
            .map(|slot| Counter::new(CounterId::from_slot(slot)))
            .collect();

        for (id, tick) in self.opens_at {
            if id.0 == 0 || id.slot() >= counters.len() {
                return Err(BxError::CounterNotFound(id).into());
            }
            counters[id.slot()].set_opens_at(tick);
        }

        log::info!(
            "built simulation: {} counter(s), {} ticks, seed {}",
            self.config.counters,
            self.config.horizon_ticks,
            self.config.seed,
        );

        Ok(Sim {
            clock:     self.config.make_clock(),
            monitor:   AbandonmentMonitor::new(self.config.patience_ticks),
            cost:      CostModel::from_config(&self.config),
            config:    self.config,
            process:   self.process,
            customers: CustomerArena::new(),
            counters,
            queue:     WaitingQueue::new(),
            metrics:   MetricsAccumulator::new(),
        })
    }
}
