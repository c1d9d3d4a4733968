//! Application startup
//!
//! [`startup`] deals with the process: arguments, configuration file, logging
//! and the environment. [`Runner`] then performs one invocation (optional
//! discovery, the scan, terminal launches) against injectable collaborators.

use crate::app::cli::args::{early_color_choice, Args};
use crate::app::cli::config::{build_config, ConfigFile};
use crate::core::config::Config;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{effective_level, init_logging};
use crate::core::terminal::{
    self, CommandDispatcher, LaunchError, ProcessDispatcher, TerminalLauncher,
};
use crate::repository::engine::GitEngine;
use crate::repository::gix_engine::GixEngine;
use crate::scanner::discovery::Discovery;
use crate::scanner::ignore::IgnoreList;
use crate::scanner::manager::Scanner;
use crate::scanner::registry::Registry;
use std::ffi::OsString;
use std::io::Write;

/// Run the application, returning the process exit status
pub fn startup() -> i32 {
    let argv: Vec<OsString> = std::env::args_os().collect();

    let help_color = early_color_choice(&argv);
    let mut args = match Args::try_parse_styled(argv, help_color) {
        Ok(args) => args,
        Err(e) => {
            // --help and --version come through here as well
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return code;
        }
    };

    let config_file = match ConfigFile::load(args.config_file.as_deref()) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Some(file) = config_file.as_ref() {
        args.apply_toml_values(&file.table);
    }

    let color = args.color_enabled();
    colored::control::set_override(color);

    let level = effective_level(args.log_level.as_deref(), args.verbosity());
    let log_file = args.log_file_path().map(|p| p.to_string_lossy().into_owned());
    if let Err(e) = init_logging(
        Some(level),
        args.log_format.as_deref(),
        log_file.as_deref(),
        color,
    ) {
        eprintln!("Error: cannot initialise logging: {}", e);
        return 1;
    }
    log::debug!("gitmeta {} starting", env!("CARGO_PKG_VERSION"));

    let config = match build_config(&args, config_file.as_ref(), |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context(&e, "Loading configuration");
            return 1;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Runner::new(GixEngine, &config)
        .line_width(terminal::line_width())
        .color(color)
        .run(&args, &mut out)
}

/// One invocation: discovery when asked for (or when no registry exists
/// yet), then the scan with its status lines and terminal launches
pub struct Runner<'c, E: GitEngine, D: CommandDispatcher = ProcessDispatcher> {
    engine: E,
    config: &'c Config,
    launcher: TerminalLauncher<D>,
    line_width: usize,
    color: bool,
}

impl<'c, E: GitEngine> Runner<'c, E, ProcessDispatcher> {
    pub fn new(engine: E, config: &'c Config) -> Self {
        Self::with_dispatcher(engine, config, ProcessDispatcher)
    }
}

impl<'c, E: GitEngine, D: CommandDispatcher> Runner<'c, E, D> {
    pub fn with_dispatcher(engine: E, config: &'c Config, dispatcher: D) -> Self {
        Self {
            engine,
            config,
            launcher: TerminalLauncher::with_dispatcher(config.terminal.clone(), dispatcher),
            line_width: terminal::DEFAULT_LINE_WIDTH,
            color: false,
        }
    }

    pub fn line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn launcher(&self) -> &TerminalLauncher<D> {
        &self.launcher
    }

    /// Status lines go to `out`; diagnostics go to stderr. Returns the exit
    /// status.
    pub fn run<O: Write>(&self, args: &Args, out: &mut O) -> i32 {
        self.run_with_diagnostics(args, out, &mut std::io::stderr())
    }

    pub fn run_with_diagnostics<O: Write, W: Write>(
        &self,
        args: &Args,
        out: &mut O,
        diagnostics: &mut W,
    ) -> i32 {
        let mut registry = match Registry::load(&self.config.registry_file) {
            Ok(registry) => registry,
            Err(e) => {
                log_error_with_context(&e, "Loading repository registry");
                return 1;
            }
        };

        if args.discover || !registry.file_exists() {
            if !args.discover {
                log::info!(
                    "No registry at {}, discovering repositories",
                    registry.file().display()
                );
            }
            let ignore = IgnoreList::load(&self.config.ignore_file);
            let found = Discovery::new(&self.engine, &ignore)
                .discover_reporting(&self.config.scan_root, out);
            if let Err(e) = registry.replace(found) {
                log_error_with_context(&e, "Saving repository registry");
                return 1;
            }
        }

        let launch = args.terminal && self.launcher_ready();
        let mut scanner = Scanner::with_engine(&mut registry, &self.engine);
        let records = scanner.iter_with_diagnostics(args.filter(), args.clean, diagnostics);
        for record in records {
            let line = record.status_line(self.line_width).render(self.color);
            if let Err(e) = writeln!(out, "{}", line) {
                // Closed pipe, nobody is reading any more
                log::debug!("Cannot write status line: {}", e);
                break;
            }
            if launch {
                if let Err(e) = self.launcher.launch(record.path()) {
                    log::error!("{}", e);
                }
            }
        }
        0
    }

    fn launcher_ready(&self) -> bool {
        if self.launcher.is_configured() {
            true
        } else {
            log::error!("{}", LaunchError::NotConfigured);
            false
        }
    }
}
