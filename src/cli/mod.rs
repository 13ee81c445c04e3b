//! Command-line interface: image normalization, importing identifications, browsing history

pub mod commands;
pub mod report;
pub mod timestamps;

pub use commands::{Cli, Commands, run};
