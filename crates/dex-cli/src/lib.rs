//! CLI library components for the item catalog builder.

pub mod cli;
pub mod commands;
pub mod decode;
pub mod logging;
pub mod progress;
pub mod types;
