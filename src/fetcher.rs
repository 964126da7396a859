use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("sinkzone/", env!("CARGO_PKG_VERSION"));

/// How a fetch was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache file matched the remote's reported content length; no body
    /// was transferred.
    CacheFresh,
    /// The body was downloaded and written over the cache file.
    Downloaded,
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder().user_agent(USER_AGENT).build().unwrap(),
        }
    }

    /// Ensures `cache_path` holds current content for `url`.
    ///
    /// With a warm cache, a HEAD request decides whether the download can be
    /// skipped: a success response reporting a content length equal to the
    /// cached file's size means the cache is fresh. Any other HEAD result
    /// falls through to a full download. An `Err` means no valid cache is
    /// guaranteed; the caller decides whether that is fatal. No retries.
    pub async fn fetch(&self, url: &str, cache_path: &Path) -> Result<FetchOutcome> {
        if let Ok(meta) = tokio::fs::metadata(cache_path).await {
            match self.client.head(url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    // Response::content_length() reports the body size hint,
                    // which is empty on a HEAD response; the advertised
                    // length lives in the header.
                    let remote_len = resp
                        .headers()
                        .get(reqwest::header::CONTENT_LENGTH)
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.parse::<u64>().ok());
                    if remote_len == Some(meta.len()) {
                        debug!(
                            "Cache for {} is fresh ({} bytes), skipping download",
                            url,
                            meta.len()
                        );
                        return Ok(FetchOutcome::CacheFresh);
                    }
                }
                Ok(resp) => debug!("HEAD {} returned {}, downloading", url, resp.status()),
                Err(e) => debug!("HEAD {} failed ({}), downloading", url, e),
            }
        }

        info!("Downloading {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?
            .error_for_status()
            .with_context(|| format!("Failed to fetch {url}"))?;

        let stream = resp
            .bytes_stream()
            .map(|result| result.map_err(std::io::Error::other));
        let mut reader = StreamReader::new(stream);
        let mut file = tokio::fs::File::create(cache_path)
            .await
            .with_context(|| format!("Failed to create cache file {}", cache_path.display()))?;
        tokio::io::copy(&mut reader, &mut file)
            .await
            .with_context(|| format!("Failed to write cache file {}", cache_path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to write cache file {}", cache_path.display()))?;

        Ok(FetchOutcome::Downloaded)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
