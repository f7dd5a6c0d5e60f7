//! `boxes`: command-line front end for the rust_boxes service-counter
//! simulator.
//!
//! Simulates the 08:00–12:00 opening of an office with 1–10 service boxes,
//! prints the nine headline figures, and optionally exports CSV, JSON, or a
//! sweep over every box count.

mod cli;
mod report;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use bx_core::{MAX_COUNTERS, RunConfig};
use bx_output::{CsvWriter, OutputWriter, SimOutputObserver};
use bx_sim::{NoopObserver, RunResult, SimBuilder, SimObserver, Snapshot};

use cli::Cli;

/// Ticks between progress lines (one simulated hour).
const PROGRESS_INTERVAL_TICKS: u64 = 3_600;

// ── Observer: progress logging plus optional CSV export ───────────────────────

struct AppObserver<W: OutputWriter> {
    csv:   Option<SimOutputObserver<W>>,
    clock: bx_core::SimClock,
}

impl<W: OutputWriter> SimObserver for AppObserver<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        if snapshot.tick.0 % PROGRESS_INTERVAL_TICKS == 0 {
            log::info!(
                "{}: {} waiting, {}/{} boxes busy, {} served, {} abandoned",
                self.clock.wall_time(snapshot.tick),
                snapshot.waiting_count(),
                snapshot.busy_count(),
                snapshot.counters.len(),
                snapshot.metrics.served,
                snapshot.metrics.abandoned,
            );
        }
        if let Some(csv) = &mut self.csv {
            csv.on_snapshot(snapshot);
        }
    }

    fn on_customer_done(&mut self, customer: &bx_sim::Customer) {
        if let Some(csv) = &mut self.csv {
            csv.on_customer_done(customer);
        }
    }

    fn on_sim_end(&mut self, result: &RunResult) {
        if let Some(csv) = &mut self.csv {
            csv.on_sim_end(result);
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_single(cli: &Cli, config: RunConfig) -> Result<()> {
    let mut sim = SimBuilder::stochastic(config.clone())?.build()?;

    let csv = match &cli.output {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            let writer = CsvWriter::new(dir)?;
            Some(SimOutputObserver::new(writer, &config))
        }
        None => None,
    };
    let mut obs = AppObserver { csv, clock: config.make_clock() };

    let t0 = Instant::now();
    let result = sim.run(&mut obs)?;
    log::info!("simulation complete in {:.3} s", t0.elapsed().as_secs_f64());

    if let Some(csv) = &mut obs.csv {
        if let Some(e) = csv.take_error() {
            eprintln!("output error: {e}");
        }
    }

    if cli.json {
        let doc = serde_json::json!({
            "config":   config,
            "metrics":  result.metrics,
            "counters": result.counter_stats,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        report::print_result(&config, &result);
    }
    Ok(())
}

fn run_sweep(cli: &Cli, base: RunConfig) -> Result<()> {
    let mut rows = Vec::with_capacity(MAX_COUNTERS);
    for counters in 1..=MAX_COUNTERS {
        let config = RunConfig { counters, ..base.clone() };
        let result = SimBuilder::stochastic(config)?
            .build()?
            .run(&mut NoopObserver)?;
        rows.push(result);
    }

    if cli.json {
        let doc: Vec<_> = rows
            .iter()
            .map(|r| serde_json::json!({ "counters": r.counters, "metrics": r.metrics }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        report::print_sweep(&rows);
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::set_up_logger(&cli)?;
    let config = cli.run_config();

    if cli.sweep {
        run_sweep(&cli, config)
    } else {
        run_single(&cli, config)
    }
}
