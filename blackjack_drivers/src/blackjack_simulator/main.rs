mod decision;
mod simulation;

use anyhow::Context;
use blackjack_os::Rule;
use blackjack_os_drivers::{parse_config_from_file, Config, ReportFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_os.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Log every game and reshuffle
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays many games with the exact strategy and reports the payouts
    Simulate(SimulateArgs),
    /// Evaluates a single decision point
    Decide(decision::DecideArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[arg(short, long)]
    games: Option<u64>,

    #[arg(short, long)]
    decks: Option<u8>,

    #[arg(short, long)]
    reshuffle_proportion: Option<f64>,

    /// 0 for one thread per core
    #[arg(short, long)]
    threads: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// text or yaml
    #[arg(short, long)]
    format: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = CommandLineArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(&args.config)?;

    match args.command {
        Command::Simulate(simulate_args) => {
            apply_overrides(&mut config, simulate_args);
            let rule: Rule = config.rule.try_into().context("invalid rule in config")?;
            let format = config.blackjack_simulator.get_report_format()?;
            let result = simulation::run(&rule, &config.blackjack_simulator)?;
            match format {
                ReportFormat::Text => simulation::print_report(&result),
                ReportFormat::Yaml => print!("{}", serde_yaml::to_string(&result)?),
            }
        }
        Command::Decide(decide_args) => {
            let rule: Rule = config.rule.try_into().context("invalid rule in config")?;
            decision::run(&rule, &decide_args)?;
        }
    }

    Ok(())
}

/// Reads the config file. Without a config file at the default path, the
/// built-in defaults are used.
fn load_config(path: &str) -> anyhow::Result<Config> {
    if path != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(path)
            .with_context(|| format!("failed to load config from {}", path));
    }

    let home_dir = home::home_dir().context("cannot find home directory")?;
    let config_file_path: PathBuf = home_dir.join(".blackjack_os.yml");
    if !config_file_path.exists() {
        warn!(
            "{} not found, using the default config",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    if config_file_path.is_dir() {
        anyhow::bail!("{} should be a file rather than a directory", config_file_path.display());
    }
    parse_config_from_file(&config_file_path)
        .with_context(|| format!("failed to load config from {}", config_file_path.display()))
}

fn apply_overrides(config: &mut Config, args: SimulateArgs) {
    if let Some(games) = args.games {
        config.blackjack_simulator.games = games;
    }
    if let Some(decks) = args.decks {
        config.rule.number_of_decks = decks;
    }
    if let Some(reshuffle_proportion) = args.reshuffle_proportion {
        config.rule.reshuffle_proportion = reshuffle_proportion;
    }
    if let Some(threads) = args.threads {
        config.blackjack_simulator.number_of_threads = threads;
    }
    if args.seed.is_some() {
        config.blackjack_simulator.seed = args.seed;
    }
    if let Some(format) = args.format {
        config.blackjack_simulator.report_format = format;
    }
}
