//! Grammar-Scraper main entry point
//!
//! This is the command-line interface for the dictionary site scraper.

use anyhow::Context;
use clap::Parser;
use grammar_scraper::config::{load_config_with_hash, Config};
use grammar_scraper::crawler::{Dispatcher, ProcessLauncher};
use grammar_scraper::output::print_statistics;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Grammar websites content parser
///
/// Scrapes word definitions and examples from every registered dictionary
/// site and writes one `<domain>.json` file per site.
#[derive(Parser, Debug)]
#[command(name = "grammar-scraper")]
#[command(version)]
#[command(about = "Grammar websites content parser", long_about = None)]
struct Cli {
    /// Specify the single website url to parse
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Parralelize parsers execution, one process per site
    #[arg(short, long)]
    parralel: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory for result files (overrides the configuration)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// List registered sites and exit
    #[arg(long, conflicts_with_all = ["url", "parralel"])]
    list_sites: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Arguments handed to every child process in parallel mode
    fn passthrough_args(&self, output_dir: &Path) -> Vec<OsString> {
        let mut args = Vec::new();

        if let Some(config) = &self.config {
            args.push(OsString::from("--config"));
            args.push(config.clone().into_os_string());
        }

        args.push(OsString::from("--output-dir"));
        args.push(output_dir.as_os_str().to_os_string());

        if self.quiet {
            args.push(OsString::from("--quiet"));
        }
        for _ in 0..self.verbose {
            args.push(OsString::from("--verbose"));
        }

        args
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    let output_dir = config.output.directory.clone();

    let dispatcher = Dispatcher::new(config).context("failed to initialise scraper")?;

    if cli.list_sites {
        for site in dispatcher.registry().sites() {
            println!("{}\t{}\t{}", site.domain, site.site.kind.as_str(), site.site.url);
        }
        return Ok(());
    }

    if let Some(url) = &cli.url {
        let report = dispatcher.run_url(url).await?;
        if !cli.quiet {
            print_statistics(&report.domain, &report.stats);
        }
    } else if cli.parralel {
        let launcher = ProcessLauncher::current_exe(cli.passthrough_args(&output_dir))?;
        dispatcher.run_parallel(&launcher).await?;
    } else {
        for report in dispatcher.run_sequential().await? {
            if !cli.quiet {
                print_statistics(&report.domain, &report.stats);
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("grammar_scraper=info,warn"),
            1 => EnvFilter::new("grammar_scraper=debug,info"),
            2 => EnvFilter::new("grammar_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
