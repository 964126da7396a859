use crate::aggregator;
use crate::config::{Config, Source};
use crate::fetcher::Fetcher;
use crate::parser::{self, ListFormat};
use crate::reload::ZoneReloader;
use crate::zone;
use anyhow::{Context, Result};
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct RunSummary {
    pub sources_ok: usize,
    pub sources_skipped: usize,
    pub unique_hosts: usize,
}

/// Drives one end-to-end run: fetch and parse every source, aggregate,
/// write the zone, optionally trigger a reload.
pub struct Runner {
    config: Config,
    fetcher: Fetcher,
    reloader: Box<dyn ZoneReloader>,
}

impl Runner {
    pub fn new(config: Config, reloader: Box<dyn ZoneReloader>) -> Self {
        Self {
            config,
            fetcher: Fetcher::new(),
            reloader,
        }
    }

    pub async fn run(&self, trigger_reload: bool) -> Result<RunSummary> {
        tokio::fs::create_dir_all(&self.config.cache_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create cache directory {}",
                    self.config.cache_dir.display()
                )
            })?;

        // Sources are processed one at a time; a failure affects only its
        // own contribution.
        let mut collected = Vec::new();
        let mut sources_ok = 0;
        let mut sources_skipped = 0;
        for (name, source) in self.config.sources_sorted() {
            match self.process_source(&name, &source).await {
                Ok(mut hosts) => {
                    info!("Source '{}' contributed {} entries", name, hosts.len());
                    collected.append(&mut hosts);
                    sources_ok += 1;
                }
                Err(e) => {
                    error!("Skipping source '{}': {:#}", name, e);
                    sources_skipped += 1;
                }
            }
        }

        let hosts = aggregator::aggregate(collected, &self.config.exclusions);
        info!(
            "{} unique hosts from {} sources ({} skipped, {} exclusion entries)",
            hosts.len(),
            sources_ok,
            sources_skipped,
            self.config.exclusions.len()
        );

        zone::write(&hosts, &self.config.zone_file, &self.config.origin).await?;

        if trigger_reload {
            if let Err(e) = self.reloader.reload(&self.config.origin).await {
                warn!("Zone reload failed: {:#}", e);
            }
        }

        Ok(RunSummary {
            sources_ok,
            sources_skipped,
            unique_hosts: hosts.len(),
        })
    }

    async fn process_source(&self, name: &str, source: &Source) -> Result<Vec<String>> {
        let cache_path = self.config.cache_path(name);
        self.fetcher.fetch(&source.url, &cache_path).await?;

        let format: ListFormat = source.format.parse()?;
        let content = tokio::fs::read_to_string(&cache_path)
            .await
            .with_context(|| format!("Failed to read cache file {}", cache_path.display()))?;
        Ok(parser::parse(format, &content))
    }
}
