//! Dispatcher - selects and runs site parsers
//!
//! A run resolves one or more registered sites and, for each of them:
//! - Instantiates the site's parser
//! - Crawls the site into a result mapping
//! - Writes the mapping with the configured result writer
//!
//! Sites run one after another inside this process, or each in its own child
//! process of the current executable.

use crate::config::Config;
use crate::crawler::Fetcher;
use crate::output::{writer_for, ResultWriter, RunStats};
use crate::sites::{RegisteredSite, Registry};
use crate::ScrapeError;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitStatus;
use tokio::process::{Child, Command};

/// Outcome of one parser run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Domain of the site that was scraped
    pub domain: String,

    /// File the results were written to
    pub output_path: PathBuf,

    /// Counts of what was scraped
    pub stats: RunStats,
}

/// Spawns one child process per site in parallel mode
///
/// Each child is started as `<program> <args...> --url <site url>`, so it runs
/// exactly one parser in-process.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessLauncher {
    /// Creates a launcher for `program` with arguments passed to every child
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Creates a launcher re-running the current executable
    pub fn current_exe(args: Vec<OsString>) -> Result<Self, ScrapeError> {
        Ok(Self::new(std::env::current_exe()?, args))
    }

    fn spawn(&self, site_url: &str) -> Result<Child, ScrapeError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg("--url")
            .arg(site_url)
            .spawn()?;
        Ok(child)
    }
}

/// Runs site parsers and writes their results
pub struct Dispatcher {
    registry: Registry,
    fetcher: Fetcher,
    writer: Box<dyn ResultWriter>,
}

impl Dispatcher {
    /// Creates a dispatcher for every site in the configuration
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let fetcher = Fetcher::new(&config.user_agent, &config.http)?;
        let writer = writer_for(&config.output);
        let registry = Registry::from_config(&config);
        Ok(Self::with_parts(registry, fetcher, writer))
    }

    /// Creates a dispatcher from already built parts
    pub fn with_parts(registry: Registry, fetcher: Fetcher, writer: Box<dyn ResultWriter>) -> Self {
        Self {
            registry,
            fetcher,
            writer,
        }
    }

    /// The registered sites
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs only the site whose domain matches `url`
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The site was scraped and written
    /// * `Err(ScrapeError::UnknownSite)` - No site is registered for the domain
    /// * `Err(ScrapeError)` - The crawl or the write failed
    pub async fn run_url(&self, url: &str) -> Result<RunReport, ScrapeError> {
        let site = self.registry.resolve(url)?;
        self.run_site(site).await
    }

    /// Runs every registered site, one after another
    ///
    /// Stops at the first failing site.
    pub async fn run_sequential(&self) -> Result<Vec<RunReport>, ScrapeError> {
        let mut reports = Vec::with_capacity(self.registry.len());
        for site in self.registry.sites() {
            reports.push(self.run_site(site).await?);
        }
        Ok(reports)
    }

    /// Runs every registered site in its own process
    ///
    /// All children are started before any is awaited, and every child is
    /// awaited even when an earlier one failed.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Every child exited successfully
    /// * `Err(ScrapeError::ParallelRun)` - Domains whose child failed
    pub async fn run_parallel(&self, launcher: &ProcessLauncher) -> Result<(), ScrapeError> {
        let mut children = Vec::with_capacity(self.registry.len());

        for site in self.registry.sites() {
            tracing::info!("Starting parser process for {}", site.domain);
            children.push((site.domain.clone(), launcher.spawn(&site.site.url)?));
        }

        let mut failed = Vec::new();
        for (domain, mut child) in children {
            match child.wait().await {
                Ok(status) if status.success() => {
                    tracing::info!("Parser process for {} finished", domain);
                }
                Ok(status) => {
                    tracing::error!("Parser process for {} {}", domain, describe(status));
                    failed.push(domain);
                }
                Err(e) => {
                    tracing::error!("Could not wait for parser process for {}: {}", domain, e);
                    failed.push(domain);
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ScrapeError::ParallelRun { failed })
        }
    }

    async fn run_site(&self, site: &RegisteredSite) -> Result<RunReport, ScrapeError> {
        let parser = site.build()?;
        tracing::info!("Scraping {} with the {} parser", site.domain, parser.name());

        let mapping = parser.parse(&self.fetcher).await?;
        let output_path = self.writer.write(&site.domain, &mapping)?;

        let stats = RunStats::from_mapping(&mapping);
        stats.log(&site.domain);

        Ok(RunReport {
            domain: site.domain.clone(),
            output_path,
            stats,
        })
    }
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}
