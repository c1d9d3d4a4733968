//! Logging bootstrap on top of flexi_logger
//!
//! Logs go to stderr so status lines on stdout stay parseable. The level
//! comes from `--log-level` when given, otherwise from the default adjusted by
//! `-v` / `-q`.

use colored::Colorize;
use flexi_logger::{DeferredNow, FileSpec, FormatFunction, Logger, LoggerHandle};
use log::{Level, Record};
use std::io::Write;
use std::sync::OnceLock;
use strum_macros::{Display, EnumString};

// Dropping the handle would stop the logger
static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
const DEFAULT_LEVEL_INDEX: i8 = 2; // warn

/// Layout of one log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// `HH:mm:ss.fff WRN message`
    #[default]
    Text,
    /// Date, level, message and source location
    Ext,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Unknown names fall back to [`LogFormat::Text`]
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|name| name.parse().ok()).unwrap_or_default()
    }

    fn formatter(self, color: bool) -> FormatFunction {
        match (self, color) {
            (LogFormat::Json, _) => json_format,
            (LogFormat::Ext, true) => extended_color_format,
            (LogFormat::Ext, false) => extended_format,
            (LogFormat::Text, true) => simple_color_format,
            (LogFormat::Text, false) => simple_format,
        }
    }
}

/// Resolve the effective level name from an explicit level and a verbosity
/// offset (`verbose - quiet`).
pub fn effective_level(explicit: Option<&str>, verbosity: i8) -> &'static str {
    if let Some(level) = explicit {
        if let Some(known) = LEVELS.iter().find(|l| l.eq_ignore_ascii_case(level)) {
            return *known;
        }
    }
    let index = DEFAULT_LEVEL_INDEX
        .saturating_add(verbosity)
        .clamp(0, LEVELS.len() as i8 - 1);
    LEVELS[index as usize]
}

/// Start the global logger. With a log file, warnings and errors are still
/// copied to stderr.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = LogFormat::from_name(log_format);
    let mut logger = Logger::try_with_str(log_level.unwrap_or("warn"))?
        .format(format.formatter(color_enabled));

    if let Some(file_path) = log_file {
        // Escape codes have no place in a file
        logger = logger
            .log_to_file(FileSpec::try_from(std::path::Path::new(file_path))?)
            .format_for_files(format.formatter(false))
            .duplicate_to_stderr(flexi_logger::Duplicate::Warn);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(handle);
    Ok(())
}

fn level_tag(level: Level, color: bool) -> String {
    let tag = match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    };
    if !color {
        return tag.to_string();
    }
    let colored = match level {
        Level::Error => tag.red().bold(),
        Level::Warn => tag.yellow(),
        Level::Info => tag.green(),
        Level::Debug => tag.blue(),
        Level::Trace => tag.magenta(),
    };
    colored.to_string()
}

fn write_line(
    w: &mut dyn Write,
    stamp: String,
    record: &Record,
    location: Option<String>,
    color: bool,
) -> std::io::Result<()> {
    let stamp = if color { stamp.dimmed().to_string() } else { stamp };
    write!(w, "{} {} {}", stamp, level_tag(record.level(), color), record.args())?;
    match location {
        Some(location) if color => write!(w, " ({})", location.dimmed()),
        Some(location) => write!(w, " ({})", location),
        None => Ok(()),
    }
}

fn simple_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write_line(w, now.format("%H:%M:%S%.3f").to_string(), record, None, false)
}

fn simple_color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write_line(w, now.format("%H:%M:%S%.3f").to_string(), record, None, true)
}

// "YYYY-MM-DD HH:mm:ss.fff WRN message (scanner/registry.rs:42)"
fn extended_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    let stamp = now.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    let location = source_location(record.target(), record.line());
    write_line(w, stamp, record, Some(location), false)
}

fn extended_color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    let stamp = now.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    let location = source_location(record.target(), record.line());
    write_line(w, stamp, record, Some(location), true)
}

fn json_format(w: &mut dyn Write, now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_tag(record.level(), false),
        "message": record.args().to_string(),
        "target": source_location(record.target(), record.line()),
    });
    serde_json::to_writer(w, &line).map_err(std::io::Error::from)
}

// gitmeta::scanner::registry -> scanner/registry.rs
fn source_location(target: &str, line: Option<u32>) -> String {
    let file = match target.strip_prefix("gitmeta::") {
        Some(module) => module.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };
    match line {
        Some(line) => format!("{}:{}", file, line),
        None => file,
    }
}
