//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_summaries.csv`
//! - `customers.csv`
//! - `run_summary.csv`
//!
//! `None` values are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CustomerRow, OutputResult, RunSummaryRow, TickSummaryRow};

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    customers: Writer<File>,
    run:       Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "wall_time", "waiting", "busy", "arrived", "served", "abandoned",
        ])?;

        let mut customers = Writer::from_path(dir.join("customers.csv"))?;
        customers.write_record([
            "customer_id", "disposition", "arrival", "assignment", "completion",
            "abandoned_at", "counter_id", "wait_ticks",
        ])?;

        let mut run = Writer::from_path(dir.join("run_summary.csv"))?;
        run.write_record([
            "counters", "ticks_run", "arrived", "served", "abandoned", "min_service",
            "max_service", "min_wait", "max_wait", "counter_cost", "abandonment_cost",
            "total_cost",
        ])?;

        Ok(Self {
            summaries,
            customers,
            run,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.wall_time.clone(),
            row.waiting.to_string(),
            row.busy.to_string(),
            row.arrived.to_string(),
            row.served.to_string(),
            row.abandoned.to_string(),
        ])?;
        Ok(())
    }

    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()> {
        self.customers.write_record(&[
            row.customer_id.to_string(),
            row.disposition.to_string(),
            row.arrival.to_string(),
            opt(row.assignment),
            opt(row.completion),
            opt(row.abandoned_at),
            opt(row.counter_id),
            opt(row.wait_ticks),
        ])?;
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.run.write_record(&[
            row.counters.to_string(),
            row.ticks_run.to_string(),
            row.arrived.to_string(),
            row.served.to_string(),
            row.abandoned.to_string(),
            opt(row.min_service),
            opt(row.max_service),
            opt(row.min_wait),
            opt(row.max_wait),
            row.counter_cost.to_string(),
            row.abandonment_cost.to_string(),
            row.total_cost.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.customers.flush()?;
        self.run.flush()?;
        Ok(())
    }
}
