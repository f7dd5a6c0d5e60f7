//! Human-readable result tables.

use bx_core::RunConfig;
use bx_sim::{MinMax, RunResult};

/// `12 min 05 s`, or `N/A` when there is no data.
fn fmt_ticks(ticks: Option<u64>) -> String {
    match ticks {
        Some(t) => format!("{} min {:02} s", t / 60, t % 60),
        None    => "N/A".to_owned(),
    }
}

fn fmt_pct(rate: Option<f64>) -> String {
    rate.map(|r| format!("{:.1}%", r * 100.0))
        .unwrap_or_else(|| "N/A".to_owned())
}

pub fn print_result(config: &RunConfig, result: &RunResult) {
    let m = &result.metrics;
    let clock = config.make_clock();
    let min = |r: Option<MinMax>| fmt_ticks(r.map(|r| r.min));
    let max = |r: Option<MinMax>| fmt_ticks(r.map(|r| r.max));

    println!("{}", "=".repeat(60));
    println!("SIMULATION RESULTS");
    println!("{}", "=".repeat(60));
    println!(
        "Boxes: {}  |  Window: {} - {}  |  Seed: {}",
        result.counters,
        clock.wall_time(bx_core::Tick::ZERO),
        clock.wall_time(config.end_tick()),
        config.seed,
    );
    if result.ticks_run > config.horizon_ticks {
        println!("Last customer left at {}", clock.wall_time(bx_core::Tick(result.ticks_run)));
    }
    println!();
    println!("1) Customers arrived:            {}", m.arrived);
    println!("2) Customers served:             {}", m.served);
    println!("3) Customers abandoned:          {}", m.abandoned);
    println!("4) Minimum service time:         {}", min(m.service_ticks));
    println!("5) Maximum service time:         {}", max(m.service_ticks));
    println!("6) Minimum waiting time:         {}", min(m.wait_ticks));
    println!("7) Maximum waiting time:         {}", max(m.wait_ticks));
    println!("8) Box cost:                     ${}", m.cost.counters);
    println!("   Abandonment loss:             ${}", m.cost.abandonment);
    println!("9) Total operating cost:         ${}", m.total_cost());
    println!();
    println!("Service rate: {}  |  Abandonment rate: {}", fmt_pct(m.service_rate()), fmt_pct(m.abandonment_rate()));
    if result.unfinished > 0 {
        println!("Still in the office at closing: {}", result.unfinished);
    }
    println!();
    println!("{:<6} {:>8} {:>12}", "Box", "Served", "Utilisation");
    println!("{}", "-".repeat(28));
    for stats in &result.counter_stats {
        let util = stats.busy_ticks as f64 / result.ticks_run.max(1) as f64;
        println!("{:<6} {:>8} {:>11.1}%", stats.id.0, stats.served, util * 100.0);
    }
}

pub fn print_sweep(results: &[RunResult]) {
    println!("{:<6} {:>8} {:>8} {:>10} {:>12}", "Boxes", "Served", "Lost", "Lost %", "Total cost");
    println!("{}", "-".repeat(48));
    for r in results {
        let m = &r.metrics;
        println!(
            "{:<6} {:>8} {:>8} {:>10} {:>12}",
            r.counters,
            m.served,
            m.abandoned,
            fmt_pct(m.abandonment_rate()),
            m.total_cost(),
        );
    }
    if let Some(best) = results.iter().min_by_key(|r| (r.metrics.total_cost(), r.counters)) {
        println!();
        println!("Cheapest: {} box(es) at ${}", best.counters, best.metrics.total_cost());
    }
}
