//! CLI library components for sheetmerge.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
