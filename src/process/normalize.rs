// src/process/normalize.rs

use indexmap::{map::Entry, IndexMap};
use tracing::{debug, warn};

use super::raw_table::{Cell, RawRow, RawTable};
use crate::error::SchemaMismatchError;
use crate::ship::{Dataset, ShipRecord, Stat, Stats};

pub const ID: &str = "ID";
pub const NAME: &str = "Ship Name";
pub const RARITY: &str = "Rarity";
pub const NATION: &str = "Nation";
pub const TYPE: &str = "Type";

/// Source label for each stat. The page leaves most stat headers blank
/// (icons only), so these are positional: `Unnamed: <column index>`.
/// Update here when the upstream layout shifts.
pub const STAT_COLUMNS: [(Stat, &str); Stat::COUNT] = [
    (Stat::Luck, "Unnamed: 5"),
    (Stat::Armor, "Unnamed: 6"),
    (Stat::Speed, "Spd"),
    (Stat::Health, "Unnamed: 8"),
    (Stat::Firepower, "Unnamed: 9"),
    (Stat::AA, "Unnamed: 10"),
    (Stat::Torpedo, "Unnamed: 11"),
    (Stat::Evasion, "Unnamed: 12"),
    (Stat::Aviation, "Unnamed: 13"),
    (Stat::Oil, "Unnamed: 14"),
    (Stat::Reload, "Unnamed: 15"),
    (Stat::ASW, "Unnamed: 16"),
    (Stat::Oxygen, "Unnamed: 17"),
    (Stat::Ammo, "Unnamed: 18"),
    (Stat::Accuracy, "Unnamed: 19"),
];

/// Turn the scraped category tables into one dataset keyed by ID.
///
/// - exactly `expected` sections are required, each with a table
/// - every row must carry every mapped label
/// - a repeated ID overwrites the earlier record in place
/// - rows with a blank ID are passed through unkeyed; they are dropped before writing
pub fn normalize(
    tables: &[Option<RawTable>],
    expected: usize,
) -> Result<Dataset, SchemaMismatchError> {
    if tables.len() != expected {
        return Err(SchemaMismatchError::TableCount {
            expected,
            found: tables.len(),
        });
    }

    let mut by_id: IndexMap<String, ShipRecord> = IndexMap::new();
    let mut unkeyed = Vec::new();

    for (t, table) in tables.iter().enumerate() {
        let table = table
            .as_ref()
            .ok_or(SchemaMismatchError::MissingTable { section: t })?;
        for (r, row) in table.rows.iter().enumerate() {
            let ship = to_record(row, t, r)?;
            if ship.is_malformed() {
                debug!(table = t, row = r, name = %ship.name, "row without ID");
                unkeyed.push(ship);
                continue;
            }
            match by_id.entry(ship.id.clone()) {
                Entry::Occupied(mut slot) => {
                    warn!(
                        id = %ship.id,
                        previous = %slot.get().name,
                        replacement = %ship.name,
                        "duplicate ID within fetch, keeping the later row"
                    );
                    slot.insert(ship);
                }
                Entry::Vacant(slot) => {
                    slot.insert(ship);
                }
            }
        }
    }

    debug!(keyed = by_id.len(), unkeyed = unkeyed.len(), "normalized");
    let mut out: Dataset = by_id.into_values().collect();
    out.extend(unkeyed);
    Ok(out)
}

fn to_record(row: &RawRow, table: usize, row_idx: usize) -> Result<ShipRecord, SchemaMismatchError> {
    let cell = |label: &str| {
        row.get(label)
            .ok_or_else(|| SchemaMismatchError::MissingColumn {
                table,
                row: row_idx,
                label: label.to_string(),
            })
    };
    let text = |label: &str| cell(label).map(Cell::as_text);

    let mut stats = Stats::default();
    for (stat, label) in STAT_COLUMNS {
        stats.set(stat, cell(label)?.as_number());
    }

    Ok(ShipRecord {
        id: text(ID)?,
        name: text(NAME)?,
        rarity: text(RARITY)?,
        acquired: String::new(),
        nation: text(NATION)?,
        ship_type: text(TYPE)?,
        stats,
    })
}
