//! The `Sim` struct and its tick loop.

use bx_core::{BoundaryPolicy, CounterId, CustomerId, RunConfig, SimClock, Tick};

use crate::{
    AbandonmentMonitor, CostModel, Counter, CounterView, Customer, CustomerArena, Disposition,
    MetricsAccumulator, MetricsSummary, NoopObserver, RandomProcess, SimBuilder, SimError,
    SimObserver, SimResult, Snapshot, WaitingQueue,
};

// ── Per-tick and per-run results ──────────────────────────────────────────────

/// Everything that changed during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub tick:      Tick,
    pub arrival:   Option<CustomerId>,
    /// `(customer, counter)` pairs, ascending counter id.
    pub assigned:  Vec<(CustomerId, CounterId)>,
    /// Customers who gave up, in arrival order.
    pub abandoned: Vec<CustomerId>,
    /// `(customer, counter)` pairs, ascending counter id.
    pub completed: Vec<(CustomerId, CounterId)>,
}

impl TickOutcome {
    /// Customers that reached a terminal state this tick.
    pub fn finished(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.abandoned
            .iter()
            .copied()
            .chain(self.completed.iter().map(|&(c, _)| c))
    }
}

/// Lifetime totals for one counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterStats {
    pub id:         CounterId,
    pub served:     u64,
    pub busy_ticks: u64,
}

/// Final (or partial, if the run was stopped early) result of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    pub counters:      usize,
    /// Number of ticks processed.
    pub ticks_run:     u64,
    pub metrics:       MetricsSummary,
    /// Served and abandoned customers, in arrival order.
    pub history:       Vec<Customer>,
    /// Customers still waiting or in service when the run stopped.
    pub unfinished:    usize,
    pub counter_stats: Vec<CounterStats>,
}

/// Build and run a stochastic simulation of `config` to completion.
pub fn run(config: RunConfig) -> SimResult<RunResult> {
    SimBuilder::stochastic(config)?
        .build()?
        .run(&mut NoopObserver)
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The service-counter simulation engine.
///
/// Each call to [`step`][Self::step] processes one tick in a fixed phase
/// order:
///
/// 1. **Arrival**: one trial against the random process; a success admits a
///    customer at the tail of the waiting queue.
/// 2. **Assignment**: available counters, lowest id first, each take the
///    head of the queue.
/// 3. **Abandonment**: waiting customers whose wait reached the patience
///    threshold leave.
/// 4. **Completion**: busy counters advance; finished customers are served.
///
/// Phases 2 and 3 swap under [`BoundaryPolicy::AbandonFirst`].  Observers
/// only ever see state between ticks.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: RandomProcess> {
    pub(crate) config:    RunConfig,
    pub(crate) clock:     SimClock,
    pub(crate) process:   P,
    pub(crate) customers: CustomerArena,
    /// Indexed by `CounterId::slot()`.
    pub(crate) counters:  Vec<Counter>,
    pub(crate) queue:     WaitingQueue,
    pub(crate) monitor:   AbandonmentMonitor,
    pub(crate) metrics:   MetricsAccumulator,
    pub(crate) cost:      CostModel,
}

impl<P: RandomProcess> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until [`is_finished`][Self::is_finished] and return the result.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunResult> {
        log::info!(
            "running {} counter(s) from {} for {} ticks",
            self.config.counters,
            self.clock,
            self.config.horizon_ticks,
        );
        while !self.is_finished() {
            self.observed_tick(observer)?;
        }
        let result = self.result();
        observer.on_sim_end(&result);
        log::info!(
            "finished at {}: arrived {}, served {}, abandoned {}, cost {}",
            self.clock,
            result.metrics.arrived,
            result.metrics.served,
            result.metrics.abandoned,
            result.metrics.total_cost(),
        );
        Ok(result)
    }

    /// Run exactly `n` ticks from the current position, ignoring the horizon
    /// and the drain rule.  Arrivals still stop at the horizon.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    /// Process one tick and return the snapshot of its end state.
    pub fn step(&mut self) -> SimResult<Snapshot> {
        let now = self.clock.current_tick;
        self.process_tick(now)?;
        self.clock.advance();
        Ok(self.snapshot_at(now))
    }

    /// `true` once the horizon has passed (and, with `drain_after_close`,
    /// nobody is left waiting or in service).
    pub fn is_finished(&self) -> bool {
        let closed = self.clock.current_tick >= self.config.end_tick();
        closed && (!self.config.drain_after_close || self.is_empty())
    }

    /// Snapshot of the last completed tick; `None` before the first tick.
    pub fn snapshot(&self) -> Option<Snapshot> {
        let now = self.clock.current_tick;
        (now > Tick::ZERO).then(|| self.snapshot_at(Tick(now.0 - 1)))
    }

    /// Metrics so far, costed for the configured counter count.
    pub fn summary(&self) -> MetricsSummary {
        self.metrics.summary(&self.cost, self.config.counters)
    }

    /// Result as of the last completed tick.
    pub fn result(&self) -> RunResult {
        RunResult {
            counters:      self.config.counters,
            ticks_run:     self.clock.current_tick.0,
            metrics:       self.summary(),
            history:       self.customers.terminal().cloned().collect(),
            unfinished:    self.waiting_count() + self.in_service_count(),
            counter_stats: self
                .counters
                .iter()
                .map(|c| CounterStats {
                    id:         c.id(),
                    served:     c.served(),
                    busy_ticks: c.busy_ticks(),
                })
                .collect(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn customers(&self) -> &CustomerArena {
        &self.customers
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn queue(&self) -> &WaitingQueue {
        &self.queue
    }

    pub fn process(&self) -> &P {
        &self.process
    }

    #[inline]
    pub fn waiting_count(&self) -> usize {
        self.queue.len()
    }

    pub fn in_service_count(&self) -> usize {
        self.counters.iter().filter(|c| !c.is_idle()).count()
    }

    /// Check the containment and conservation invariants of the current
    /// state.  Returns the first violation found.
    pub fn audit(&self) -> SimResult<()> {
        let violation = |msg: String| Err(SimError::Invariant(msg));

        for entry in self.queue.iter() {
            let c = self.customers.lookup(entry.customer)?;
            if c.disposition != Disposition::Waiting {
                return violation(format!("{} queued while {:?}", c.id, c.disposition));
            }
        }
        for counter in &self.counters {
            if let Some(id) = counter.occupant() {
                let c = self.customers.lookup(id)?;
                if c.disposition != Disposition::InService || c.counter != Some(counter.id()) {
                    return violation(format!("{} holds {} in state {:?}", counter.id(), id, c.disposition));
                }
            }
        }
        if self.customers.count(Disposition::Waiting) != self.waiting_count() {
            return violation("waiting customer outside the queue".into());
        }
        if self.customers.count(Disposition::InService) != self.in_service_count() {
            return violation("in-service customer without a counter".into());
        }

        let m = &self.metrics;
        let accounted = m.served() + m.abandoned()
            + self.waiting_count() as u64
            + self.in_service_count() as u64;
        if m.arrived() != accounted {
            return violation(format!("arrived {} != accounted {accounted}", m.arrived()));
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let outcome = self.process_tick(now)?;
        self.clock.advance();

        for id in outcome.finished() {
            observer.on_customer_done(self.customers.lookup(id)?);
        }
        observer.on_tick_end(&outcome);
        if now.0 % self.config.snapshot_interval_ticks == 0 || self.is_finished() {
            observer.on_snapshot(&self.snapshot_at(now));
        }
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickOutcome> {
        let mut outcome = TickOutcome { tick: now, ..TickOutcome::default() };

        // ── Phase 1: arrival ──────────────────────────────────────────────
        if now < self.config.end_tick() && self.process.try_arrival(now) {
            let id = self.customers.admit(now);
            self.queue.enqueue(self.customers.lookup(id)?);
            self.metrics.record_arrival();
            log::debug!("{now}: {id} arrives");
            outcome.arrival = Some(id);
        }

        // ── Phases 2–3: assignment and abandonment ────────────────────────
        match self.config.boundary_policy {
            BoundaryPolicy::AssignFirst => {
                self.assign_phase(now, &mut outcome)?;
                self.abandon_phase(now, &mut outcome)?;
            }
            BoundaryPolicy::AbandonFirst => {
                self.abandon_phase(now, &mut outcome)?;
                self.assign_phase(now, &mut outcome)?;
            }
        }

        // ── Phase 4: service completion ───────────────────────────────────
        self.completion_phase(now, &mut outcome)?;

        Ok(outcome)
    }

    /// Hand the head of the queue to each available counter, lowest id first.
    fn assign_phase(&mut self, now: Tick, outcome: &mut TickOutcome) -> SimResult<()> {
        for counter in self.counters.iter_mut() {
            if !counter.is_available(now) {
                continue;
            }
            let Some(id) = self.queue.pop_earliest() else {
                break;
            };
            let duration = self.process.sample_service_duration().max(1);
            counter.assign(id, duration, now)?;
            self.customers
                .lookup_mut(id)?
                .begin_service(now, counter.id(), duration)?;
            log::debug!("{now}: {id} assigned to {} for {duration} ticks", counter.id());
            outcome.assigned.push((id, counter.id()));
        }
        Ok(())
    }

    fn abandon_phase(&mut self, now: Tick, outcome: &mut TickOutcome) -> SimResult<()> {
        let evicted = self.monitor.evict(now, &mut self.queue, &mut self.customers)?;
        for id in &evicted {
            self.metrics.record_abandonment();
            log::debug!("{now}: {id} abandons");
        }
        outcome.abandoned = evicted;
        Ok(())
    }

    fn completion_phase(&mut self, now: Tick, outcome: &mut TickOutcome) -> SimResult<()> {
        for counter in self.counters.iter_mut() {
            if let Some(id) = counter.tick(now) {
                let customer = self.customers.lookup_mut(id)?;
                customer.complete(now)?;
                self.metrics.record_service(customer);
                log::debug!("{now}: {id} served at {}", counter.id());
                outcome.completed.push((id, counter.id()));
            }
        }
        Ok(())
    }

    fn snapshot_at(&self, tick: Tick) -> Snapshot {
        Snapshot {
            tick,
            counters: self
                .counters
                .iter()
                .map(|c| CounterView {
                    id:              c.id(),
                    state:           c.state(),
                    occupant:        c.occupant(),
                    remaining_ticks: c.remaining(),
                })
                .collect(),
            waiting:  self.queue.iter().copied().collect(),
            metrics:  self.summary(),
        }
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.counters.iter().all(Counter::is_idle)
    }
}
