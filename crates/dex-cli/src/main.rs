//! Item catalog builder CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use dex_catalog::RunOptions;
use dex_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use dex_cli::commands::{
    Dirs, run_all, run_decode, run_expansions, run_families, run_items_command, run_verify,
};
use dex_cli::logging::{LogConfig, LogFormat, init_logging};
use dex_cli::progress::StageProgress;
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{print_all, print_expansions, print_families, print_items, print_verify};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let dirs = Dirs::resolve(cli.sources.clone(), cli.out.clone());
    let result = match cli.command {
        Command::Verify => run_verify(&dirs).map(|summary| print_verify(&summary)),
        Command::Expansions => run_expansions(&dirs).map(|result| print_expansions(&result)),
        Command::Families => run_families(&dirs).map(|result| print_families(&result)),
        Command::Items(args) => {
            let mut progress = progress_for(&log_config);
            run_items_command(&dirs, RunOptions::from(args), &mut progress)
                .map(|result| print_items(&result))
        }
        Command::All(args) => {
            let mut progress = progress_for(&log_config);
            run_all(&dirs, RunOptions::from(args), &mut progress).map(|result| print_all(&result))
        }
        Command::Decode(args) => run_decode(&dirs, args.itemid).map(|report| print!("{report}")),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Bars stay off when they would interleave with info-level logs on stderr.
fn progress_for(config: &LogConfig) -> StageProgress {
    let logs_on_stderr = config.log_file.is_none() && config.level_filter >= LevelFilter::INFO;
    if logs_on_stderr {
        StageProgress::hidden()
    } else {
        StageProgress::new()
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
