use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

mod config;
mod diff;

pub use config::Config;

/// Compare two mzXML files scan by scan
#[derive(Parser)]
#[command(name = "mzxml-diff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input mzXML files; the last two are compared
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Do not compare scan headers
    #[arg(long = "noHeaders")]
    no_headers: bool,

    /// Do not compare peak lists
    #[arg(long = "noPeaks")]
    no_peaks: bool,

    /// Leave zero-intensity peaks out of the peak comparison
    #[arg(long = "noZeroInt")]
    no_zero_int: bool,

    /// Exit with status 2 when any difference was reported
    #[arg(long)]
    fail_on_diff: bool,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Checks clap cannot express: files may be split up by flags
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.files.len() < 2 {
            return Err(Cli::command().error(
                ErrorKind::TooFewValues,
                "at least two input files are required",
            ));
        }
        Ok(())
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // flags only ever disable
    let mut options = config.compare.options();
    options.headers &= !cli.no_headers;
    options.peaks &= !cli.no_peaks;
    options.zero_intensity &= !cli.no_zero_int;
    let fail_on_diff = cli.fail_on_diff || config.compare.fail_on_diff.unwrap_or(false);

    diff::run(&cli.files, options, fail_on_diff)
}
