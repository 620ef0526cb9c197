//! `sii-decode`: decode SII files locally.
//!
//! ```text
//! sii-decode [OPTIONS] [FILES]...
//! ```
//!
//! Each file is selected in turn, exactly as if picked one after another in
//! the file picker. Decoded text goes to stdout; status and logs go to stderr.
//! Exit code is 1 when any file could not be decoded.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pipeline_logging::pipeline_warn;
use sii_app::platform::{self, logging, AppConfig, DispatchSetting, LogDestination, RunOptions};

#[derive(Parser)]
#[command(
    name = "sii-decode",
    version,
    about = "Decode SII configuration files locally",
    long_about = "Decode SII configuration files locally.\n\n\
                  Plain SiiN text and ScsC-encrypted text saves are supported. \
                  Binary (BSII) save data, the default format for game saves, \
                  is reported as unsupported."
)]
struct Cli {
    /// Files to decode, selected one after another.
    files: Vec<PathBuf>,

    /// Save each successful download into this directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Where the decoder runs (overrides the config file).
    #[arg(long, value_enum)]
    dispatch: Option<DispatchSetting>,

    /// RON config file.
    #[arg(long, default_value = "sii-decode.ron")]
    config: PathBuf,

    /// Log destination (overrides the config file).
    #[arg(long, value_enum)]
    log: Option<LogDestination>,

    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long)]
    log_level: Option<String>,

    /// Do not print decoded text.
    #[arg(short, long)]
    quiet: bool,

    /// Print the effective config as RON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (mut config, config_error) = match AppConfig::load(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = Some(dir);
    }
    if let Some(dispatch) = cli.dispatch {
        config.dispatch = dispatch;
    }
    if let Some(log) = cli.log {
        config.log = log;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    logging::initialize(config.log, config.level_filter());
    if let Some(err) = config_error {
        pipeline_warn!("{}; using defaults", err);
    }

    if cli.print_config {
        return match config.to_ron() {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let options = RunOptions {
        files: cli.files,
        config,
        quiet: cli.quiet,
    };
    match platform::run_app(options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
