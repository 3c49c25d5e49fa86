use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use twitter_analysis::{load_config, run, stats, AnalysisConfig, ConfigOverrides};

/// Follower and retweet queries over a social graph dataset.
#[derive(Parser)]
#[command(name = "twitter-analysis", about = "Follower and retweet queries over a social graph dataset")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Common {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Edge list, one `A -> B` per line
    #[arg(short, long)]
    dataset: Option<PathBuf>,
    /// Graph representation (list or matrix)
    #[arg(short, long)]
    backend: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer every query in the query file
    Run {
        #[command(flatten)]
        common: Common,
        /// Query list, one `<type> <userA> <userB> ?` per line
        #[arg(short, long)]
        queries: Option<PathBuf>,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Show dataset statistics
    Stats {
        #[command(flatten)]
        common: Common,
        /// Number of most-connected users to list
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(common: &Common, overrides: ConfigOverrides) -> twitter_analysis::Result<AnalysisConfig> {
    let mut config = load_config(common.config.as_deref())?;
    config.apply(ConfigOverrides {
        dataset: common.dataset.clone(),
        backend: common.backend.clone(),
        ..overrides
    })?;
    Ok(config)
}

fn execute(command: Commands) -> twitter_analysis::Result<()> {
    match command {
        Commands::Run {
            common,
            queries,
            output,
            format,
        } => {
            let config = resolve_config(
                &common,
                ConfigOverrides {
                    queries,
                    output,
                    format,
                    ..ConfigOverrides::default()
                },
            )?;
            let summary = run(&config)?;
            println!(
                "Answered {} queries ({} repeated, {} skipped) -> {}",
                summary.answered,
                summary.duplicates,
                summary.skipped,
                config.output.display()
            );
        }
        Commands::Stats { common, top, json } => {
            let config = resolve_config(&common, ConfigOverrides::default())?;
            let report = stats(&config, top)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
