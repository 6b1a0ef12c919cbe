// src/workbook/read.rs

use calamine::{open_workbook_auto, Data, Reader};
use std::{collections::HashMap, path::Path};
use tracing::{debug, instrument, warn};

use super::layout;
use crate::error::WorkbookError;
use crate::ship::{Dataset, ShipRecord, Stat, Stats};

/// Load a dataset previously written by [`super::write_dataset`] (or edited by hand).
///
/// Columns are matched by header name on the first sheet. `ID` and `Name`
/// must be present; other missing columns read as blank.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, WorkbookError> {
    let path = path.as_ref();
    let open_err = |source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(open_err)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(open_err)?,
        None => {
            return Err(WorkbookError::NoSheet {
                path: path.to_path_buf(),
            })
        }
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        warn!("workbook is empty");
        return Ok(Dataset::new());
    };
    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell_text(cell), i))
        .filter(|(name, _)| !name.is_empty())
        .collect();

    let require = |header: &'static str| {
        columns
            .get(header)
            .copied()
            .ok_or_else(|| WorkbookError::MissingHeader {
                path: path.to_path_buf(),
                header,
            })
    };
    let id_col = require(layout::ID)?;
    let name_col = require(layout::NAME)?;
    let acquired_col = columns
        .get(layout::ACQUIRED)
        .or_else(|| columns.get(layout::ACQUIRED_LEGACY))
        .copied();
    let rarity_col = columns.get(layout::RARITY).copied();
    let nation_col = columns.get(layout::NATION).copied();
    let type_col = columns.get(layout::TYPE).copied();
    let stat_cols: Vec<(Stat, Option<usize>)> = Stat::ALL
        .into_iter()
        .map(|s| (s, columns.get(s.name()).copied()))
        .collect();

    let ships: Dataset = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            let text = |col: Option<usize>| {
                col.and_then(|c| row.get(c))
                    .map(cell_text)
                    .unwrap_or_default()
            };
            let mut stats = Stats::default();
            for &(stat, col) in &stat_cols {
                stats.set(stat, col.and_then(|c| row.get(c)).and_then(cell_number));
            }
            ShipRecord {
                id: text(Some(id_col)),
                name: text(Some(name_col)),
                rarity: text(rarity_col),
                acquired: text(acquired_col),
                nation: text(nation_col),
                ship_type: text(type_col),
                stats,
            }
        })
        .collect();

    debug!(records = ships.len(), "read previous dataset");
    Ok(ships)
}

/// Integral floats (an ID column that lost its text format) print without `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
