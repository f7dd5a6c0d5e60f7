//! The `OutputWriter` trait implemented by backend writers.

use crate::{CustomerRow, OutputResult, RunSummaryRow, TickSummaryRow};

/// Sink for simulation output rows.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one terminal customer.
    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()>;

    /// Write the run's final figures.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
