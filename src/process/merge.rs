// src/process/merge.rs

use std::collections::HashSet;
use tracing::debug;

use crate::ship::Dataset;

/// `existing` followed by `incoming`, keeping only the first record per ID.
/// Previously saved records (and their `acquired` flag) therefore always win.
/// Records with a blank ID are passed through untouched.
pub fn merge(existing: Dataset, incoming: Dataset) -> Dataset {
    let total = existing.len() + incoming.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut out = Dataset::with_capacity(total);

    for ship in existing.into_iter().chain(incoming) {
        if ship.is_malformed() || seen.insert(ship.id.clone()) {
            out.push(ship);
        }
    }

    debug!(input = total, output = out.len(), "merged");
    out
}
