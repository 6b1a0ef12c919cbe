// src/ship.rs

use std::fmt;

/// The fifteen per-ship statistics, in the column order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Luck,
    Armor,
    Speed,
    Health,
    Firepower,
    AA,
    Torpedo,
    Evasion,
    Aviation,
    Oil,
    Reload,
    ASW,
    Oxygen,
    Ammo,
    Accuracy,
}

impl Stat {
    pub const COUNT: usize = 15;

    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::Luck,
        Stat::Armor,
        Stat::Speed,
        Stat::Health,
        Stat::Firepower,
        Stat::AA,
        Stat::Torpedo,
        Stat::Evasion,
        Stat::Aviation,
        Stat::Oil,
        Stat::Reload,
        Stat::ASW,
        Stat::Oxygen,
        Stat::Ammo,
        Stat::Accuracy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stat::Luck => "Luck",
            Stat::Armor => "Armor",
            Stat::Speed => "Speed",
            Stat::Health => "Health",
            Stat::Firepower => "Firepower",
            Stat::AA => "AA",
            Stat::Torpedo => "Torpedo",
            Stat::Evasion => "Evasion",
            Stat::Aviation => "Aviation",
            Stat::Oil => "Oil",
            Stat::Reload => "Reload",
            Stat::ASW => "ASW",
            Stat::Oxygen => "Oxygen",
            Stat::Ammo => "Ammo",
            Stat::Accuracy => "Accuracy",
        }
    }

    pub fn from_name(name: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|s| s.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stat values indexed by [`Stat`]; `None` where the page leaves the cell blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats([Option<f64>; Stat::COUNT]);

impl Stats {
    pub fn get(&self, stat: Stat) -> Option<f64> {
        self.0[stat.index()]
    }

    pub fn set(&mut self, stat: Stat, value: Option<f64>) {
        self.0[stat.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, Option<f64>)> + '_ {
        Stat::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Rarity tiers that get a row colour. Other values are kept verbatim, uncoloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Normal,
    Rare,
    Elite,
    Priority,
    SuperRare,
    UltraRare,
    Decisive,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Normal,
        Rarity::Rare,
        Rarity::Elite,
        Rarity::Priority,
        Rarity::SuperRare,
        Rarity::UltraRare,
        Rarity::Decisive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Normal => "Normal",
            Rarity::Rare => "Rare",
            Rarity::Elite => "Elite",
            Rarity::Priority => "Priority",
            Rarity::SuperRare => "Super Rare",
            Rarity::UltraRare => "Ultra Rare",
            Rarity::Decisive => "Decisive",
        }
    }

    pub fn from_label(label: &str) -> Option<Rarity> {
        Rarity::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// One ship, as written to a row of the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipRecord {
    /// Opaque text; leading zeros are significant (`"001"` is not `"1"`).
    pub id: String,
    pub name: String,
    pub rarity: String,
    /// Maintained by hand in the spreadsheet; empty for freshly scraped ships.
    pub acquired: String,
    pub nation: String,
    pub ship_type: String,
    pub stats: Stats,
}

impl ShipRecord {
    /// A record without an ID cannot be merged or written.
    pub fn is_malformed(&self) -> bool {
        self.id.trim().is_empty()
    }
}

pub type Dataset = Vec<ShipRecord>;
