use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_sources")]
    pub sources: HashMap<String, Source>,

    #[serde(default)]
    pub exclusions: Vec<String>,

    #[serde(default = "default_zone_file")]
    pub zone_file: PathBuf,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,

    #[serde(default = "default_origin")]
    pub origin: String,

    /// Accepted for config compatibility; record emission does not branch on
    /// it (AAAA records are always written).
    #[serde(default)]
    pub ipv6: bool,

    #[serde(default)]
    pub reload: ReloadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One remote blacklist: where to get it and how to read it.
///
/// `format` stays a plain string so an unknown value fails when the source
/// is processed, skipping that source instead of rejecting the whole file.
#[derive(Debug, Deserialize, Clone)]
pub struct Source {
    pub url: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReloadConfig {
    #[serde(default = "default_reload_command")]
    pub command: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Defaults
fn default_zone_file() -> PathBuf {
    PathBuf::from("rpz.zone")
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}
fn default_cache_prefix() -> String {
    "list-".to_string()
}
fn default_origin() -> String {
    "rpz".to_string()
}
fn default_reload_command() -> Vec<String> {
    vec!["rndc".to_string(), "reload".to_string()]
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_sources() -> HashMap<String, Source> {
    let mut m = HashMap::new();
    m.insert(
        "stevenblack".to_string(),
        Source {
            url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/hosts".to_string(),
            format: "hosts".to_string(),
        },
    );
    m
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            command: default_reload_command(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validated once here; the struct is immutable afterwards.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("no sources configured");
        }
        for (name, source) in &self.sources {
            if name.is_empty() {
                bail!("source with empty name");
            }
            if source.url.is_empty() {
                bail!("source '{}' has an empty url", name);
            }
            if source.format.is_empty() {
                bail!("source '{}' has an empty format", name);
            }
        }
        if self.origin.is_empty() {
            bail!("origin must not be empty");
        }
        if self.zone_file.as_os_str().is_empty() {
            bail!("zone_file must not be empty");
        }
        if self.cache_dir.as_os_str().is_empty() {
            bail!("cache_dir must not be empty");
        }
        if self.reload.command.is_empty() {
            bail!("reload command must not be empty");
        }
        Ok(())
    }

    pub fn sources_sorted(&self) -> Vec<(String, Source)> {
        let mut list: Vec<_> = self
            .sources
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list
    }

    pub fn cache_path(&self, source_name: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}{}.list", self.cache_prefix, source_name))
    }
}
