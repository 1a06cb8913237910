use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use cpu_sched::models::ProcessMetrics;
use cpu_sched::{SimulationRequest, SimulationResult};

/// cpu-sched: run a CPU scheduling simulation from a scenario file.
///
/// The scenario is a JSON document:
///
///   { "algorithm": "SRTF", "quantum": 2,
///     "processes": [ { "pid": "P1", "arrival": 0, "burst": 5, "priority": 1 } ] }
///
/// Supported algorithms: FCFS, SJF, SRTF, PRIORITY, ROUND_ROBIN (or RR).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Path to the JSON scenario file.
    scenario: PathBuf,

    /// Override the scenario's algorithm.
    #[clap(short = 'a', long)]
    algorithm: Option<String>,

    /// Override the Round Robin time quantum.
    #[clap(short = 'q', long)]
    quantum: Option<i64>,

    /// Print the result as JSON instead of a table.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    json: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<()> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn load_request(opts: &Opts) -> Result<SimulationRequest> {
    let text = fs::read_to_string(&opts.scenario)
        .with_context(|| format!("Failed to read {}", opts.scenario.display()))?;
    let mut request: SimulationRequest = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", opts.scenario.display()))?;

    if let Some(algorithm) = &opts.algorithm {
        request.algorithm = algorithm.clone();
    }
    if opts.quantum.is_some() {
        request.config.quantum = opts.quantum;
    }
    debug!("request: {request:?}");
    Ok(request)
}

fn print_table(result: &SimulationResult) {
    println!("Algorithm: {} ({})", result.algorithm, result.algorithm.description());
    println!();
    println!("Gantt: {}", result.timeline);
    println!();

    let width = result
        .metrics
        .iter()
        .map(|m| m.process_id.len())
        .max()
        .unwrap_or(0)
        .max("PID".len());
    println!(
        "{:<width$}  {:>8} {:>6} {:>10} {:>10} {:>8} {:>8}",
        "PID", "Arrival", "Burst", "Completion", "Turnaround", "Waiting", "Response"
    );
    for ProcessMetrics {
        process_id,
        arrival,
        burst,
        completion,
        turnaround,
        waiting,
        response,
        ..
    } in &result.metrics
    {
        println!(
            "{process_id:<width$}  {arrival:>8} {burst:>6} {completion:>10} {turnaround:>10} {waiting:>8} {response:>8}"
        );
    }

    let s = &result.summary;
    println!();
    println!("Average waiting time:    {:.2}", s.avg_waiting);
    println!("Average turnaround time: {:.2}", s.avg_turnaround);
    println!("Average response time:   {:.2}", s.avg_response);
    println!("CPU utilization:         {:.1}%", s.cpu_utilization * 100.0);
    println!("Throughput:              {:.3} processes/unit", s.throughput);
    println!(
        "Total time: {}  (busy {}, idle {}, {} context switches)",
        s.total_time, s.busy_time, s.idle_time, s.context_switches
    );
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    let request = load_request(&opts)?;
    info!(
        "Simulating {} processes with {}",
        request.processes.len(),
        request.algorithm
    );
    let result = request.run().context("Simulation failed")?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table(&result);
    }
    Ok(())
}
