//! Command-line arguments and logger setup.

use std::path::PathBuf;

use clap::Parser;

use bx_core::{BoundaryPolicy, RunConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Service-box queue simulation (08:00–12:00)")]
pub struct Cli {
    /// Number of service boxes (1-10).
    #[arg(
        short = 'n',
        long,
        value_parser = clap::value_parser!(u8).range(1..=10),
        required_unless_present = "sweep",
        conflicts_with = "sweep"
    )]
    pub counters: Option<u8>,

    /// Run every box count from 1 to 10 with the same seed and compare costs.
    #[arg(long)]
    pub sweep: bool,

    /// Master RNG seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Simulated ticks (seconds) during which customers arrive.
    #[arg(long, default_value_t = 14_400)]
    pub horizon: u64,

    /// Per-second arrival probability.
    #[arg(long, default_value_t = 1.0 / 144.0)]
    pub arrival_probability: f64,

    /// Mean service time in seconds.
    #[arg(long, default_value_t = 600.0)]
    pub service_mean: f64,

    /// Service time standard deviation in seconds.
    #[arg(long, default_value_t = 300.0)]
    pub service_std_dev: f64,

    /// Seconds a customer waits before leaving.
    #[arg(long, default_value_t = 1_800)]
    pub patience: u64,

    /// Fixed cost per box.
    #[arg(long, default_value_t = 1_000)]
    pub cost_per_box: u64,

    /// Loss per customer who leaves unserved.
    #[arg(long, default_value_t = 10_000)]
    pub loss_per_abandonment: u64,

    /// Let waiting customers give up before a box that frees up on the same
    /// second can take them.
    #[arg(long)]
    pub abandon_first: bool,

    /// Keep serving after closing time until the office is empty.
    #[arg(long)]
    pub drain: bool,

    /// Snapshot interval in ticks for CSV export.
    #[arg(long, default_value_t = 60)]
    pub snapshot_interval: u64,

    /// Write CSV output into this directory.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            counters:                self.counters.unwrap_or(1) as usize,
            horizon_ticks:           self.horizon,
            arrival_probability:     self.arrival_probability,
            service_mean_ticks:      self.service_mean,
            service_std_dev_ticks:   self.service_std_dev,
            patience_ticks:          self.patience,
            cost_per_counter:        self.cost_per_box,
            loss_per_abandonment:    self.loss_per_abandonment,
            seed:                    self.seed,
            snapshot_interval_ticks: self.snapshot_interval,
            boundary_policy:         if self.abandon_first {
                BoundaryPolicy::AbandonFirst
            } else {
                BoundaryPolicy::AssignFirst
            },
            drain_after_close:       self.drain,
            ..RunConfig::default()
        }
    }
}

pub fn set_up_logger(cli: &Cli) -> Result<(), fern::InitError> {
    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {} {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr());
    if let Some(path) = &cli.log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }
    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_run_config() {
        let cli = Cli::parse_from(["boxes", "-n", "3"]);
        let config = cli.run_config();
        assert_eq!(config.counters, 3);
        assert_eq!(config.horizon_ticks, RunConfig::default().horizon_ticks);
        assert_eq!(config.boundary_policy, BoundaryPolicy::AssignFirst);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_counters_rejected() {
        assert!(Cli::try_parse_from(["boxes", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["boxes", "-n", "11"]).is_err());
    }

    #[test]
    fn counters_required_unless_sweeping() {
        assert!(Cli::try_parse_from(["boxes"]).is_err());
        assert!(Cli::try_parse_from(["boxes", "--sweep"]).is_ok());
    }

    #[test]
    fn counters_conflict_with_sweep() {
        assert!(Cli::try_parse_from(["boxes", "-n", "3", "--sweep"]).is_err());
    }

    #[test]
    fn abandon_first_flag() {
        let cli = Cli::parse_from(["boxes", "-n", "1", "--abandon-first", "--drain"]);
        let config = cli.run_config();
        assert_eq!(config.boundary_policy, BoundaryPolicy::AbandonFirst);
        assert!(config.drain_after_close);
    }
}
