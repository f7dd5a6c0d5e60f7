//! `bx-output`: CSV export for the rust_boxes simulator.
//!
//! | File                 | One row per                                     |
//! |----------------------|-------------------------------------------------|
//! | `tick_summaries.csv` | emitted snapshot (queue length, busy counters…) |
//! | `customers.csv`      | served or abandoned customer                    |
//! | `run_summary.csv`    | run (the final figures and cost breakdown)      |
//!
//! The writer implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `bx_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bx_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CustomerRow, RunSummaryRow, TickSummaryRow};
pub use writer::OutputWriter;
