// src/process/nation.rs

use std::collections::HashSet;
use tracing::debug;

use crate::ship::Dataset;

/// Bucket for every faction outside the allow-list (collaboration events).
pub const COLLAB: &str = "Collab";

/// The nations that keep their own label.
#[derive(Debug, Clone)]
pub struct NationAllowList {
    known: HashSet<String>,
}

impl NationAllowList {
    pub fn new<I, S>(nations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: nations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, nation: &str) -> bool {
        self.known.contains(nation)
    }

    pub fn canonical<'a>(&self, nation: &'a str) -> &'a str {
        if self.contains(nation) {
            nation
        } else {
            COLLAB
        }
    }
}

/// Replace every nation outside `allow` with [`COLLAB`].
pub fn canonicalize_nations(mut ships: Dataset, allow: &NationAllowList) -> Dataset {
    for ship in ships.iter_mut().filter(|s| !allow.contains(&s.nation)) {
        ship.nation = COLLAB.to_string();
    }
    ships
}

/// Remove records that have no ID.
pub fn drop_malformed(mut ships: Dataset) -> Dataset {
    let before = ships.len();
    ships.retain(|s| !s.is_malformed());
    if ships.len() != before {
        debug!(dropped = before - ships.len(), "dropped rows without ID");
    }
    ships
}

/// Final cleanup before serialization: drop ID-less rows, then bucket nations.
pub fn prepare_for_write(ships: Dataset, allow: &NationAllowList) -> Dataset {
    canonicalize_nations(drop_malformed(ships), allow)
}
