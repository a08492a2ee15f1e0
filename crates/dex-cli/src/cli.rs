//! CLI argument definitions for the catalog builder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dex",
    version,
    about = "PTCGO item catalog builder - normalize raw item data into catalog JSON",
    long_about = "Normalize raw online-game item records into the item catalog.\n\n\
                  Reads the pinned files listed in <SOURCES>/manifest.toml and writes\n\
                  per-expansion schemas, the catalog item set and the GUID map to <OUT>."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Source directory holding manifest.toml (default: $DEX_SOURCES_DIR or ./sources).
    #[arg(long = "sources", value_name = "DIR", global = true)]
    pub sources: Option<PathBuf>,

    /// Output directory (default: $DEX_DATA_DIR or ./data).
    #[arg(long = "out", value_name = "DIR", global = true)]
    pub out: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Catalog build steps and inspection tools.
#[derive(Subcommand)]
pub enum Command {
    /// Build the expansion catalog and the release-key map from set data.
    Expansions,

    /// Translate the family map.
    Families,

    /// Classify every release and write the item catalog.
    Items(ItemsArgs),

    /// Run expansions, families and items in order.
    All(ItemsArgs),

    /// Break an item identifier into its fields and show its definition.
    Decode(DecodeArgs),

    /// Check the source manifest and every pinned file.
    Verify,
}

#[derive(Args, Clone, Copy, Default)]
pub struct ItemsArgs {
    /// Only warn about attribute codes outside the known vocabulary.
    #[arg(long = "no-strict-attributes")]
    pub no_strict_attributes: bool,

    /// Skip building the PTCGO schema from product releases.
    #[arg(long = "no-product-schema")]
    pub no_product_schema: bool,
}

#[derive(Args, Clone, Copy)]
pub struct DecodeArgs {
    /// Packed identifier; negative values are price-index buckets.
    #[arg(value_name = "ITEMID", allow_negative_numbers = true)]
    pub itemid: i32,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    /// Fatal run errors only.
    Error,
    /// Redefinitions, missing item data and string overrides.
    Warn,
    /// Stage progress and inconsistencies.
    Info,
    /// Skipped records with their reason.
    Debug,
    /// Every classification decision.
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    /// Multi-line, colored when writing to a terminal.
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}
