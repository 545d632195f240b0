//! These structs provide the CLI interface for the base800 CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// base800: extract overdue receivables and build the collections remittance spreadsheet.
///
/// The purpose of this program is to log into a partner receivables API, download the overdue
/// operations for a due-date window, and write them into the fixed-layout "ARQUIVO BASE 800"
/// spreadsheet consumed by the downstream collections system.
///
/// Run `base800 init` first to create the configuration directory, then fill in the company
/// credentials in `config.json` before running `base800 export`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and write a template configuration file.
    ///
    /// The template contains placeholder credentials in square brackets. The export command
    /// refuses to run until those placeholders have been replaced with real values.
    Init,
    /// List the companies configured in config.json.
    Companies,
    /// Fetch overdue operations for one company and write the remittance spreadsheet.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// none, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where base800 configuration is held. Defaults to ~/base800
    #[arg(long, env = "BASE800_HOME", default_value_t = default_base800_home())]
    base800_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn base800_home(&self) -> &DisplayPath {
        &self.base800_home
    }
}

/// Args for the `base800 export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The key of the company to export, as configured in config.json (e.g. "unimed").
    #[arg(long)]
    company: String,

    /// Start of the due-date window, dd/mm/yyyy. Defaults to one week before the end of the
    /// window.
    #[arg(long)]
    start: Option<String>,

    /// End of the due-date window, dd/mm/yyyy. Defaults to 120 days before today.
    #[arg(long)]
    end: Option<String>,

    /// Whether written-off amounts are included in the results (the baixaPdd query parameter).
    #[arg(long, default_value_t = WriteOff::Exclude)]
    write_off: WriteOff,

    /// Where to write the spreadsheet. Defaults to
    /// {COMPANY}_ARQUIVO_BASE_800_{dd_mm_yyyy_HH_MM}.xlsx in the current directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(
        company: impl Into<String>,
        start: Option<String>,
        end: Option<String>,
        write_off: WriteOff,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            company: company.into(),
            start,
            end,
            write_off,
            output,
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn write_off(&self) -> WriteOff {
        self.write_off
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// The `baixaPdd` query flag. Serialized as "0" or "1", which is also its wire form.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum WriteOff {
    #[default]
    #[serde(rename = "0")]
    Exclude,
    #[serde(rename = "1")]
    Include,
}

serde_plain::derive_display_from_serialize!(WriteOff);
serde_plain::derive_fromstr_from_deserialize!(WriteOff);

fn default_base800_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("base800"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --base800-home or BASE800_HOME instead of relying on the \
                default base800 home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("base800")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_off_wire_form() {
        assert_eq!(WriteOff::Exclude.to_string(), "0");
        assert_eq!(WriteOff::Include.to_string(), "1");
        assert_eq!("1".parse::<WriteOff>().unwrap(), WriteOff::Include);
        assert!("2".parse::<WriteOff>().is_err());
    }

    #[test]
    fn test_parse_export_args() {
        let args = Args::parse_from([
            "base800", "export", "--company", "unimed", "--start", "01/01/2026", "--end",
            "08/01/2026", "--write-off", "1",
        ]);
        match args.command() {
            Command::Export(e) => {
                assert_eq!(e.company(), "unimed");
                assert_eq!(e.start(), Some("01/01/2026"));
                assert_eq!(e.end(), Some("08/01/2026"));
                assert_eq!(e.write_off(), WriteOff::Include);
                assert!(e.output().is_none());
            }
            other => panic!("expected export, got {other:?}"),
        }
    }
}
