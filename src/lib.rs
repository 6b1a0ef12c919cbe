pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod process;
pub mod ship;
pub mod workbook;

pub use config::Config;
pub use pipeline::{run, RunOutcome};
