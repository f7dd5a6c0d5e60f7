//! Simulation observer trait for progress reporting and data collection.

use bx_core::Tick;

use crate::{Customer, RunResult, Snapshot, TickOutcome};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers receive shared references only;
/// they can never mutate engine state.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_snapshot(&mut self, snap: &Snapshot) {
///         if snap.tick.0 % self.interval == 0 {
///             println!("{}: {} waiting", snap.tick, snap.waiting_count());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with what happened during it.
    fn on_tick_end(&mut self, _outcome: &TickOutcome) {}

    /// Called every `config.snapshot_interval_ticks` ticks and on the final
    /// tick.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once for each customer reaching `Served` or `Abandoned`.
    fn on_customer_done(&mut self, _customer: &Customer) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _result: &RunResult) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every snapshot it is shown.  Handy for tests and for replaying a run
/// into a renderer after the fact.
#[derive(Default)]
pub struct SnapshotRecorder {
    pub snapshots: Vec<Snapshot>,
}

impl SimObserver for SnapshotRecorder {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }
}
