use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

const SINKHOLE_V4: &str = "127.0.0.1";
const SINKHOLE_V6: &str = "::1";

/// Renders the full zone text: header, one blank line, then an A/AAAA pair
/// per host. Hosts that are empty or contain an underscore are not valid
/// record owner names and are skipped without comment.
pub fn render(hosts: &BTreeSet<String>, origin: &str, serial: u64) -> String {
    let mut zone = String::new();
    writeln!(zone, "$TTL 2h").unwrap();
    writeln!(
        zone,
        "@ SOA {origin}. hostmaster.{origin}. {serial} 12h 15m 3w 2h"
    )
    .unwrap();
    writeln!(zone, "@ NS nonexistent.nodomain.none.").unwrap();
    writeln!(zone, "$ORIGIN {origin}.").unwrap();
    writeln!(zone).unwrap();

    for host in hosts {
        if host.is_empty() || host.contains('_') {
            continue;
        }
        writeln!(zone, "{host}\tA\t{SINKHOLE_V4}").unwrap();
        writeln!(zone, "{host}\tAAAA\t{SINKHOLE_V6}").unwrap();
    }
    zone
}

/// Rewrites the zone file from scratch with the serial set to the current
/// Unix timestamp. Filesystem errors here are fatal for the run.
pub async fn write(hosts: &BTreeSet<String>, path: &Path, origin: &str) -> Result<()> {
    let serial = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_secs();
    let zone = render(hosts, origin, serial);
    tokio::fs::write(path, &zone)
        .await
        .with_context(|| format!("Failed to write zone file {}", path.display()))?;
    info!("Wrote {} with {} hosts", path.display(), hosts.len());
    Ok(())
}
