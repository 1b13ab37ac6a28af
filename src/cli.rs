//! CLI argument parsing and command handler

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::formatter;
use crate::output;
use crate::report::Report;
use crate::status;
use crate::targets;

/// bfstats: BigFix deployment reports to Confluence wiki tables
#[derive(Parser, Debug)]
#[command(
    name = "bfstats",
    version,
    about = "Converts BigFix deployment reports into Confluence wiki tables",
    long_about = "Reads a comma-separated file of computer group targets and a BigFix \
                  web-report export of current deployment counts, and prints a wiki \
                  table of current, target and percent complete per group.\n\n\
                  Run 'bfstats' with no arguments to show this help."
)]
pub struct Cli {
    /// Filename of the comma-separated computer group targets
    #[arg(short = 't', long = "target", value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Filename of the current computer group deployment statistics
    #[arg(short = 'c', long = "current", value_name = "FILE")]
    pub current: Option<PathBuf>,

    /// Config file (defaults to ~/.bfstats/config.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output rows as JSON instead of a wiki table
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output (only with --json)
    #[arg(long, requires = "json")]
    pub pretty: bool,

    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Execute the CLI
    pub fn execute(self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        if self.target.is_none() && self.current.is_none() {
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }

        let config = config::load_config(self.config.as_deref())?;
        let report = build_report(self.target.as_deref(), self.current.as_deref(), &config);

        if report.is_empty() {
            output::warn("No computer groups loaded; only the TOTAL column will be shown.");
        }

        if self.json {
            println!("{}", formatter::render_json(&report, self.pretty)?);
        } else {
            print!("{}", formatter::render_table(&report));
        }

        Ok(())
    }
}

/// Load both inputs and merge them
///
/// A missing or unreadable input is reported and treated as empty.
pub fn build_report(target: Option<&Path>, current: Option<&Path>, config: &Config) -> Report {
    let targets = match target {
        Some(path) => targets::load_targets(path, config.delimiter).unwrap_or_else(|e| {
            report_unreadable(path, &e);
            Vec::new()
        }),
        None => {
            output::error("Error: no target file given (use -t)");
            Vec::new()
        }
    };

    let counts = match current {
        Some(path) => status::load_status(path, &config.markers).unwrap_or_else(|e| {
            report_unreadable(path, &e);
            HashMap::new()
        }),
        None => {
            output::error("Error: no current file given (use -c)");
            HashMap::new()
        }
    };

    Report::build(targets, &counts, &config.rules)
}

fn report_unreadable(path: &Path, err: &anyhow::Error) {
    log::debug!("Input error: {:?}", err);
    output::error(&format!(
        "Error: Could not open file {}: {}",
        path.display(),
        err.root_cause()
    ));
}
