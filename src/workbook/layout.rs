// src/workbook/layout.rs
//
// Column layout and rarity colouring, kept free of any spreadsheet library.

use crate::ship::{Rarity, ShipRecord, Stat};

pub const ID: &str = "ID";
pub const NAME: &str = "Name";
pub const RARITY: &str = "Rarity";
pub const ACQUIRED: &str = "Acquired";
/// Title the column carried in older files.
pub const ACQUIRED_LEGACY: &str = "Got?";
pub const NATION: &str = "Nation";
pub const TYPE: &str = "Type";

/// Column index of each fixed field.
pub const ID_COL: u16 = 0;
pub const RARITY_COL: u16 = 2;
/// Rows are coloured from `ID` through `Acquired`.
pub const COLOURED_COLS: (u16, u16) = (ID_COL, 3);

const TEXT_COLUMNS: [&str; 6] = [ID, NAME, RARITY, ACQUIRED, NATION, TYPE];

/// Header row, in write order.
pub fn headers() -> Vec<&'static str> {
    TEXT_COLUMNS
        .into_iter()
        .chain(Stat::ALL.into_iter().map(Stat::name))
        .collect()
}

pub fn column_count() -> u16 {
    (TEXT_COLUMNS.len() + Stat::COUNT) as u16
}

/// One value to write.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// A record's cells in the order of [`headers`].
pub fn row_values(ship: &ShipRecord) -> Vec<Value<'_>> {
    let text = [
        &ship.id,
        &ship.name,
        &ship.rarity,
        &ship.acquired,
        &ship.nation,
        &ship.ship_type,
    ];
    text.into_iter()
        .map(|s| Value::Text(s.as_str()))
        .chain(ship.stats.iter().map(|(_, v)| match v {
            Some(n) => Value::Number(n),
            None => Value::Blank,
        }))
        .collect()
}

/// Background colour (0xRRGGBB) for a rarity tier. Tiers of equal standing share a colour.
pub fn rarity_colour(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Normal => 0xD5D5D5,
        Rarity::Rare => 0xBAEFFF,
        Rarity::Elite => 0xD6C7FF,
        Rarity::Priority | Rarity::SuperRare => 0xEEEECD,
        Rarity::UltraRare | Rarity::Decisive => 0xB5FFD8,
    }
}

pub const FONT_COLOUR: u32 = 0x000000;

/// Column letters for a zero-based index (`0` → `A`, `26` → `AA`).
pub fn column_letter(mut col: u16) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Conditional-format formula for one tier, anchored at the first data row (row 2).
pub fn rarity_rule(rarity: Rarity) -> String {
    format!(
        "=${}2=\"{}\"",
        column_letter(RARITY_COL),
        rarity.label()
    )
}
