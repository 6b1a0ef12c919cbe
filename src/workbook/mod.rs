// src/workbook/mod.rs
pub mod layout;
pub mod read;
pub mod write;

pub use read::read_dataset;
pub use write::write_dataset;
