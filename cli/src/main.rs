mod grid;
mod runtime;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::grid::{GridConfig, PartitionKind, parse_grid_args};
use crate::runtime::{RuntimeConfig, parse_runtime_args};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "cmdline-launch")]
#[command(about = "Resolve runtime and application flags from one argument list")]
#[command(version)]
struct Cli {
    /// Output format for the resolved configuration.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Log filter used when RUST_LOG is unset (e.g. debug, cmdline_core=trace).
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Arguments shared by the runtime and application layers.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LaunchReport {
    version: &'static str,
    runtime: RuntimeConfig,
    grid: GridConfig,
    /// Tokens neither layer recognized.
    passthrough: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut args = cli.args;
    info!(count = args.len(), "resolving launch arguments");

    let runtime = parse_runtime_args(&mut args).map_err(|e| format!("runtime: {e}"))?;
    let grid = parse_grid_args(&mut args).map_err(|e| format!("application: {e}"))?;

    let report = LaunchReport {
        version: PACKAGE_VERSION,
        runtime,
        grid,
        passthrough: args,
    };

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("failed to serialize report: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &LaunchReport) {
    let rt = &report.runtime;
    println!(
        "Runtime on {}: {} cpu(s), {} util thread(s), {} MB",
        rt.node_name, rt.cpus, rt.util_threads, rt.csize_mb
    );
    if !rt.pinned_cpus.is_empty() {
        let pinned: Vec<String> = rt.pinned_cpus.iter().map(ToString::to_string).collect();
        println!("Pinned to cpus {}", pinned.join(","));
    }
    if rt.force_kthreads {
        println!("Forcing kernel threads");
    }
    if let Some(logfile) = &rt.logfile {
        println!("Logging to {}", logfile.display());
    }
    if !rt.levels.is_empty() {
        println!("Log levels: {}", rt.levels.join(" "));
    }

    let grid = &report.grid;
    println!(
        "Running computation for ({}, {}) dimensions at angle {}...",
        grid.side_length_x, grid.side_length_y, grid.angle
    );
    println!(
        "Partitioning data into ({}, {}) sub-regions...",
        grid.num_subregions_x, grid.num_subregions_y
    );
    let kind = match grid.partition_kind {
        PartitionKind::Disjoint => "disjoint",
        PartitionKind::Compute => "computed",
    };
    println!("{} iteration(s), {kind} partitioning", grid.num_iterations);

    if !report.passthrough.is_empty() {
        println!("Unrecognized: {}", report.passthrough.join(" "));
    }
}
