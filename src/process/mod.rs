// src/process/mod.rs
pub mod merge;
pub mod nation;
pub mod normalize;
pub mod raw_table;

pub use merge::merge;
pub use nation::{canonicalize_nations, drop_malformed, prepare_for_write, NationAllowList, COLLAB};
pub use normalize::normalize;
pub use raw_table::{Cell, RawRow, RawTable};
