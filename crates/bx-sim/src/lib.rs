//! `bx-sim`: tick loop engine for the rust_boxes service-counter simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Arrival      - one Bernoulli trial; success appends a customer to the
//!                    waiting queue.
//!   ② Assignment   - each available counter, lowest id first, takes the
//!                    head of the queue and samples a service duration.
//!   ③ Abandonment  - waiting customers whose wait reached the patience
//!                    threshold leave.
//!   ④ Completion   - busy counters count down; finished customers are
//!                    served and the counter goes idle.
//!   ⑤ Snapshot     - observers see the end-of-tick state.
//! ```
//!
//! ② and ③ swap under `BoundaryPolicy::AbandonFirst`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bx_core::RunConfig;
//! use bx_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::stochastic(RunConfig::with_counters(3))?.build()?;
//! let result = sim.run(&mut NoopObserver)?;
//! println!("total cost: {}", result.metrics.total_cost());
//! ```

pub mod abandonment;
pub mod builder;
pub mod counter;
pub mod customer;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod process;
pub mod queue;
pub mod sim;
pub mod snapshot;


pub use abandonment::AbandonmentMonitor;
pub use builder::SimBuilder;
pub use counter::{Counter, CounterState};
pub use customer::{Customer, CustomerArena, Disposition};
pub use error::{SimError, SimResult};
pub use metrics::{CostBreakdown, CostModel, MetricsAccumulator, MetricsSummary, MinMax};
pub use observer::{NoopObserver, SimObserver, SnapshotRecorder};
pub use process::{RandomProcess, ScriptedProcess, StochasticProcess, floor_sample};
pub use queue::{WaitingEntry, WaitingQueue};
pub use sim::{CounterStats, RunResult, Sim, TickOutcome, run};
pub use snapshot::{CounterView, Snapshot};
