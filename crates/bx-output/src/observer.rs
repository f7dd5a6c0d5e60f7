//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use bx_core::{RunConfig, SimClock};
use bx_sim::{Customer, RunResult, SimObserver, Snapshot};

use crate::row::{CustomerRow, RunSummaryRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries, customer history, and the
/// final figures to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// rendering.
    pub fn new(writer: W, config: &RunConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            rows:       0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows successfully handed to the writer so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store(&mut self, result: OutputResult<()>) {
        match result {
            Ok(()) => self.rows += 1,
            Err(e) => {
                log::warn!("output write failed: {e}");
                // Keep only the first error.
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let row = TickSummaryRow::from_snapshot(snapshot, &self.clock);
        let result = self.writer.write_tick_summary(&row);
        self.store(result);
    }

    fn on_customer_done(&mut self, customer: &Customer) {
        let result = self.writer.write_customer(&CustomerRow::from(customer));
        self.store(result);
    }

    fn on_sim_end(&mut self, result: &RunResult) {
        let written = self.writer.write_run_summary(&RunSummaryRow::from(result));
        self.store(written);
        if let Err(e) = self.writer.finish() {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
