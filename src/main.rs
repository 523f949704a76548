use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use santa_draw::config::DrawConfig;
use santa_draw::draw::{DrawEngine, DrawOutcome};
use santa_draw::error::{Classify, Error};
use santa_draw::input::{load_assignments, DrawInput};

#[derive(Parser)]
#[command(
    name = "santa-draw",
    version,
    about = "Gift-exchange draw engine with exclusions and anti-recurrence",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides config
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML config file (environment variables are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a draw and print the assignments
    Draw {
        /// Input file (.json or .toml) with members, exclusions, previous assignments
        #[arg(short, long)]
        input: PathBuf,

        /// Fixed RNG seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Randomized attempts before the exact fallback
        #[arg(long)]
        max_attempts: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Check whether a draw is possible without running one
    Check {
        /// Input file (.json or .toml)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Verify a stored assignment list against the input constraints
    Verify {
        /// Input file (.json or .toml)
        #[arg(short, long)]
        input: PathBuf,

        /// Assignment list (.json array or .toml `assignments` table)
        #[arg(short, long)]
        assignments: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DrawConfig::from_file(path)?,
        None => DrawConfig::from_env()?,
    };
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    config.validate().context("Invalid configuration")?;

    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    let result = match cli.command {
        Commands::Draw {
            input,
            seed,
            max_attempts,
            output,
        } => {
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(max_attempts) = max_attempts {
                config.max_attempts = max_attempts;
            }
            tracing::info!(
                input = %input.display(),
                seed = ?config.seed,
                max_attempts = %config.max_attempts,
                "Starting draw command"
            );
            draw(&config, &input, output)
        }

        Commands::Check { input } => {
            tracing::info!(input = %input.display(), "Starting check command");
            check(&config, &input)
        }

        Commands::Verify { input, assignments } => {
            tracing::info!(
                input = %input.display(),
                assignments = %assignments.display(),
                "Starting verify command"
            );
            verify(&input, &assignments)
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(category = err.category().label(), error = %err, "Command failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::from(if err.is_recoverable() { 2 } else { 1 }))
        }
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("santa_draw=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("santa_draw={level},warn")))
    };

    // Logs go to stderr so stdout stays clean for JSON output.
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn draw(config: &DrawConfig, input: &Path, output: OutputFormat) -> Result<(), Error> {
    let request = DrawInput::from_path(input)?.into_request();
    let outcome = DrawEngine::new(config).draw(&request)?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => print!("{}", format_outcome(&outcome)),
    }
    Ok(())
}

fn check(config: &DrawConfig, input: &Path) -> Result<(), Error> {
    let request = DrawInput::from_path(input)?.into_request();
    DrawEngine::new(config).check_feasibility(&request)?;
    println!(
        "Draw is possible for {} members ({} exclusions, {} history entries)",
        request.members().len(),
        request.constraints().exclusion_count(),
        request.constraints().history().len()
    );
    Ok(())
}

fn verify(input: &Path, assignments: &Path) -> Result<(), Error> {
    let request = DrawInput::from_path(input)?.into_request();
    request.validate()?;
    let assignments = load_assignments(assignments)?;
    assignments.verify(&request)?;
    println!("{} assignments verified", assignments.len());
    Ok(())
}

fn format_outcome(outcome: &DrawOutcome) -> String {
    let mut output = format!(
        "Draw at {} ({} matcher, {} attempts)\n",
        outcome.drawn_at.format("%Y-%m-%d %H:%M:%S UTC"),
        outcome.matcher,
        outcome.attempts
    );
    output.push_str(&format!("{:-<40}\n", ""));
    for assignment in outcome.assignments.sorted() {
        output.push_str(&format!("{:>16} -> {}\n", assignment.giver, assignment.receiver));
    }
    output
}
