//! Command line arguments
//!
//! Flags are parsed first; configuration file values then fill in what the
//! command line left unset, so the command line always wins.

use crate::core::version;
use crate::scanner::filter::StatusFilter;
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gitmeta")]
#[command(about = "Check the status of every git repository under a directory tree")]
#[command(version, long_version = version::long_version())]
#[command(group(
    ArgGroup::new("filter")
        .args(["all", "ok", "nok", "ko", "remote", "no_remote", "unknown"])
        .multiple(false)
))]
#[command(after_help = "Without a filter flag, repositories needing attention are listed (--nok)")]
pub struct Args {
    /// Rediscover repositories under the scan root before scanning
    #[arg(short = 'd', long = "discover")]
    pub discover: bool,

    /// Remove repositories that no longer exist from the registry
    #[arg(short = 'c', long = "clean")]
    pub clean: bool,

    /// List every repository
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// List clean repositories
    #[arg(short = 'o', long = "ok")]
    pub ok: bool,

    /// List repositories that are dirty, out of sync or hold a stash
    #[arg(short = 'n', long = "nok")]
    pub nok: bool,

    /// List dirty repositories
    #[arg(short = 'k', long = "ko")]
    pub ko: bool,

    /// List repositories out of sync with their remotes
    #[arg(short = 'r', long = "remote")]
    pub remote: bool,

    /// List repositories without any remote tracking
    #[arg(long = "no-remote")]
    pub no_remote: bool,

    /// Reserved status, lists nothing
    #[arg(short = 'u', long = "unknown")]
    pub unknown: bool,

    /// Open a terminal in every listed repository
    #[arg(short = 't', long = "terminal")]
    pub terminal: bool,

    /// Root directory of the discovery walk
    #[arg(long = "scan-root", value_name = "DIR")]
    pub scan_root: Option<PathBuf>,

    /// Configuration file path
    #[arg(long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease log verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse with help styled for the current color choice, returning clap
    /// errors instead of exiting
    pub fn try_parse_styled<I, T>(argv: I, color: bool) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        use clap::{CommandFactory, FromArgMatches};

        let command = Self::command().styles(crate::core::styles::palette_to_clap(color));
        let matches = command.try_get_matches_from(argv)?;
        Self::from_arg_matches(&matches)
    }

    /// Active status filter, `not-ok` when none is given
    pub fn filter(&self) -> StatusFilter {
        if self.all {
            StatusFilter::All
        } else if self.ok {
            StatusFilter::Ok
        } else if self.ko {
            StatusFilter::Ko
        } else if self.remote {
            StatusFilter::Remote
        } else if self.no_remote {
            StatusFilter::NoRemote
        } else if self.unknown {
            StatusFilter::Unknown
        } else {
            StatusFilter::NotOk
        }
    }

    /// `-v` count minus `-q` count
    pub fn verbosity(&self) -> i8 {
        let verbose = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let quiet = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        verbose.saturating_sub(quiet)
    }

    /// Log file unless disabled with `none`
    pub fn log_file_path(&self) -> Option<&std::path::Path> {
        self.log_file
            .as_deref()
            .filter(|path| !path.as_os_str().eq_ignore_ascii_case("none"))
    }

    /// Explicit color choice, `None` for auto-detection
    pub fn color_choice(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Resolved color choice: explicit flag, then `NO_COLOR`, then whether
    /// stdout is a terminal
    pub fn color_enabled(&self) -> bool {
        use std::io::IsTerminal;

        self.color_choice().unwrap_or_else(|| {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        })
    }
}

/// Color choice from raw arguments, before clap runs, for styling help output
pub fn early_color_choice<I, T>(argv: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: AsRef<std::ffi::OsStr>,
{
    use std::io::IsTerminal;

    let mut choice = None;
    for arg in argv {
        match arg.as_ref().to_str() {
            Some("--color") => choice = Some(true),
            Some("--no-color") => choice = Some(false),
            _ => {}
        }
    }
    choice.unwrap_or_else(|| {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}
