//! CLI command handlers

pub mod commands;

pub use commands::{map_quantities, run};
