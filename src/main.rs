// Lineup assistant entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Parse command line (mode + optional --config path)
// 3. Load config
// 4. Load roster and calendar datasets
// 5. Build the pool for the requested fixture context
// 6. Print the report

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use lineup_assistant::config;
use lineup_assistant::dataset;
use lineup_assistant::fixtures::FixtureSchedule;
use lineup_assistant::lineup;
use lineup_assistant::policy::DiscardPolicy;
use lineup_assistant::pool::PoolBuilder;
use lineup_assistant::probability::FantasyPageLookup;
use lineup_assistant::report::{ConsoleReporter, Reporter};
use lineup_assistant::roster::RosterIndex;

enum Mode {
    /// Pick a starting eleven from the configured squad for one round.
    Lineup,
    /// Shortlist transfer-market players across all upcoming rounds.
    Market,
}

struct CliArgs {
    mode: Mode,
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Lineup assistant starting up");

    // 2. Parse command line
    let args = parse_args().context("failed to parse command line")?;

    // 3. Load config
    let config = config::load_config_from(&args.config_path)
        .context("failed to load configuration")?;
    info!(
        "Config loaded: roster={}, calendar={}, round={}",
        config.data.roster, config.data.calendar, config.lineup.round
    );

    // 4. Load datasets
    let teams = dataset::load_teams(config.data.roster.as_ref())
        .context("failed to load roster dataset")?;
    let calendar = dataset::load_calendar(config.data.calendar.as_ref())
        .context("failed to load calendar dataset")?;
    info!(
        "Loaded {} teams and {} rounds",
        teams.len(),
        calendar.rounds.len()
    );

    let index = RosterIndex::new(teams);
    let lookup = FantasyPageLookup::new(Duration::from_secs(config.lookup.timeout_secs))
        .context("failed to build HTTP client")?;
    let policy = DiscardPolicy::new(config.thresholds());
    let builder = PoolBuilder::new(&index, &lookup, policy);
    let mut reporter = ConsoleReporter;

    // 5 + 6. Build the pool and print the report for the requested mode.
    match args.mode {
        Mode::Lineup => {
            let schedule = FixtureSchedule::for_round(&calendar, config.lineup.round)
                .context("cannot scope matchups to the configured round")?;
            let pool = builder
                .build(&config.lineup.players, &schedule, &mut reporter)
                .await;
            info!(
                candidates = pool.candidates.len(),
                exclusions = pool.exclusions.len(),
                "pool built for lineup"
            );

            reporter.all_players("All players", &pool);
            let selection = lineup::assemble(&pool.candidates, config.quotas());
            reporter.selection("Suggested lineup", &selection);
        }
        Mode::Market => {
            let schedule = FixtureSchedule::across_rounds(&calendar);
            let pool = builder
                .build(&config.market.players, &schedule, &mut reporter)
                .await;
            info!(
                candidates = pool.candidates.len(),
                exclusions = pool.exclusions.len(),
                "pool built for market"
            );

            reporter.all_players("All players in the market", &pool);
            let ranked = lineup::rank(&pool.candidates);
            reporter.selection("Recommended players", &ranked);
        }
    }

    info!("Lineup assistant finished");
    Ok(())
}

const USAGE: &str = "usage: eleven <lineup|market> [--config <path>]";

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);

    let mode = match args.next().as_deref() {
        Some("lineup") => Mode::Lineup,
        Some("market") => Mode::Market,
        Some(other) => anyhow::bail!("unknown mode `{other}`\n{USAGE}"),
        None => anyhow::bail!("missing mode\n{USAGE}"),
    };

    let mut config_path = PathBuf::from("config.toml");
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--config" => {
                config_path = args
                    .next()
                    .map(PathBuf::from)
                    .context("--config requires a path")?;
            }
            other => anyhow::bail!("unknown argument `{other}`\n{USAGE}"),
        }
    }

    Ok(CliArgs { mode, config_path })
}

/// Initialize tracing to log to a file (not the terminal, which carries the
/// progress line and the report).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("lineup-assistant.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lineup_assistant=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
