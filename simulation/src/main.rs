//! WildGrid CLI
//!
//! Runs one simulation and prints the final grid report to stdout.
//! Always exits with status 0.

use clap::Parser;
use simulation::report::Summary;
use simulation::{ExitPolicy, Schedule, SimConfig, SimulationWorld};
use tracing::{error, warn, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_HUNTERS: usize = 2;

#[derive(Parser, Debug)]
#[command(name = "wildgrid")]
#[command(version)]
#[command(about = "Predator/prey simulation with one thread-scheduled actor per animal and hunter")]
struct Cli {
    /// Number of hunters (default 2)
    hunters: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Grid rows
    #[arg(long, default_value_t = 5)]
    width: usize,

    /// Grid columns
    #[arg(long, default_value_t = 5)]
    height: usize,

    /// Run length in milliseconds
    #[arg(long, default_value_t = 1000)]
    duration_ms: u64,

    /// Delay between actor steps in milliseconds
    #[arg(long, default_value_t = 1)]
    tick_ms: u64,

    /// Worker threads for the actor pool
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Single-threaded run on a virtual clock (reproducible with --seed)
    #[arg(long)]
    stepped: bool,

    /// Dead animals keep their slot until the deadline
    #[arg(long)]
    linger: bool,

    /// Print a JSON summary instead of the text grid
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }

    fn config(&self) -> SimConfig {
        let hunters = match &self.hunters {
            Some(raw) => parse_count(raw),
            None => DEFAULT_HUNTERS,
        };
        SimConfig {
            width: self.width,
            height: self.height,
            hunters,
            duration_ms: self.duration_ms,
            tick_ms: self.tick_ms,
            seed: self.seed,
            schedule: if self.stepped {
                Schedule::Stepped
            } else {
                Schedule::Pool {
                    workers: self.workers,
                }
            },
            exit_policy: if self.linger {
                ExitPolicy::Linger
            } else {
                ExitPolicy::Prompt
            },
            ..SimConfig::default()
        }
    }
}

/// Leading decimal digits of `raw`, or 0 when there are none.
fn parse_count(raw: &str) -> usize {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    let count: usize = digits.parse().unwrap_or(0);
    if digits.is_empty() || digits.len() != unsigned.len() {
        warn!(input = raw, count, "hunter count is not a plain number");
    }
    count
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut world = SimulationWorld::new(cli.config())?;
    world.seed_population();
    let outcome = world.run()?;
    let report = world.report();

    if cli.json {
        let summary = Summary {
            report: &report,
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[WARN] logging unavailable: {}", err);
    }

    if let Err(err) = run(&cli) {
        error!("simulation failed: {:#}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count("12abc"), 12);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("  +3"), 3);
        assert_eq!(parse_count("-4"), 0);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wildgrid"]);
        let config = cli.config();
        assert_eq!(config.hunters, 2);
        assert_eq!(config.schedule, Schedule::Pool { workers: 4 });
        assert_eq!(config.exit_policy, ExitPolicy::Prompt);

        let cli = Cli::parse_from(["wildgrid", "0", "--stepped", "--seed", "9"]);
        let config = cli.config();
        assert_eq!(config.hunters, 0);
        assert_eq!(config.schedule, Schedule::Stepped);
        assert_eq!(config.seed, Some(9));
    }
}
