//! Command line entry point: allocate outlets to routes and report travel totals.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use eyre::{eyre, Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use outlet_router::aggregate::{aggregate_all, AggregateOptions};
use outlet_router::allocator::{allocate_from_pool, AllocateOptions};
use outlet_router::catalog::LocationCatalog;
use outlet_router::haversine::HaversineDirections;
use outlet_router::osrm::{OsrmClient, OsrmConfig};
use outlet_router::pool::UnvisitedPool;
use outlet_router::report::{ReportOptions, RunReport};
use outlet_router::traits::DirectionsProvider;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderKind {
    Osrm,
    Haversine,
}

/// Split outlets across a fleet starting and ending at one depot.
///
/// Any of the three positional arguments left out is asked for on stdin.
#[derive(Debug, Parser)]
#[command(name = "outlet-router", version)]
struct Cli {
    /// Depot outlet name (case-insensitive).
    depot: Option<String>,

    /// Maximum outlets per route.
    max_outlets_per_route: Option<usize>,

    /// Number of routes (vehicles).
    total_routes: Option<usize>,

    /// CSV catalog with name, latitude and longitude columns.
    #[arg(short, long)]
    catalog: PathBuf,

    /// Where travel distances and durations come from.
    #[arg(long, value_enum, default_value_t = ProviderKind::Osrm)]
    provider: ProviderKind,

    #[arg(long, env = "OSRM_URL", default_value = "http://localhost:5000")]
    osrm_url: String,

    #[arg(long, default_value = "car")]
    profile: String,

    /// Per-request timeout for directions lookups.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Concurrent directions lookups per route.
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Assumed speed for the haversine provider.
    #[arg(long, default_value_t = 40.0)]
    speed_kmh: f64,

    /// Multiplier applied to reported travel times.
    #[arg(long, default_value_t = 1.0)]
    duration_scale: f64,

    /// Report file (JSON). Printed to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = LocationCatalog::from_csv_path(&cli.catalog)
        .wrap_err_with(|| format!("loading catalog {}", cli.catalog.display()))?;

    let options = AllocateOptions::new(
        arg_or_prompt(cli.depot.clone(), "Depot")?,
        arg_or_prompt(cli.max_outlets_per_route, "Max outlets per route")?,
        arg_or_prompt(cli.total_routes, "Total routes")?,
    );

    let mut pool = UnvisitedPool::from_catalog(&catalog);
    let route_set = allocate_from_pool(&options, &catalog, &mut pool)?;
    info!(
        routes = route_set.routes.len(),
        assigned = route_set.assigned_count(),
        unassigned = route_set.unassigned.len(),
        "allocation complete"
    );

    let provider: Box<dyn DirectionsProvider> = match cli.provider {
        ProviderKind::Osrm => Box::new(OsrmClient::new(OsrmConfig {
            base_url: cli.osrm_url.clone(),
            profile: cli.profile.clone(),
            timeout_secs: cli.timeout_secs,
        })?),
        ProviderKind::Haversine => Box::new(HaversineDirections::new(cli.speed_kmh)),
    };

    let aggregate_options = AggregateOptions {
        workers: cli.workers,
        ..AggregateOptions::default()
    };
    let summaries = aggregate_all(&route_set, &catalog, provider.as_ref(), &aggregate_options);

    let report = RunReport::build(
        &options,
        &route_set,
        &summaries,
        &ReportOptions {
            duration_scale: cli.duration_scale,
        },
    );

    match &cli.output {
        Some(path) => {
            report
                .write_to_path(path)
                .wrap_err_with(|| format!("writing report {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => report.write_json(io::stdout().lock())?,
    }

    Ok(())
}

fn arg_or_prompt<T>(value: Option<T>, label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = value {
        return Ok(value);
    }

    let mut stderr = io::stderr().lock();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    line.parse::<T>()
        .map_err(|err| eyre!("invalid {}: '{}' ({})", label.to_lowercase(), line, err))
}
