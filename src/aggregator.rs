use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Names longer than this are candidates for exclusion.
const MAX_HOST_LEN: usize = 255;

/// Collapses the collected domains into a unique, sorted set and applies the
/// exclusion rule: a domain is dropped only when it is BOTH longer than 255
/// bytes AND listed in `exclusions`. The exclusion list on its own does not
/// remove domains of ordinary length.
pub fn aggregate(collected: Vec<String>, exclusions: &[String]) -> BTreeSet<String> {
    let raw_count = collected.len();
    let unique_hosts: HashSet<String> = collected.into_iter().collect();
    let excluded_hosts: HashSet<&str> = exclusions.iter().map(String::as_str).collect();

    let mut dropped = 0usize;
    let hosts: BTreeSet<String> = unique_hosts
        .into_iter()
        .filter(|host| {
            let drop = host.len() > MAX_HOST_LEN && excluded_hosts.contains(host.as_str());
            if drop {
                dropped += 1;
            }
            !drop
        })
        .collect();

    debug!(
        "Aggregated {} hosts from {} raw entries ({} dropped by exclusion)",
        hosts.len(),
        raw_count,
        dropped
    );
    hosts
}
