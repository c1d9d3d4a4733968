//! Terminal integration
//!
//! Line width detection for the status report and the terminal-launch side
//! action. Launching is fire-and-forget: a process is spawned through a
//! [`CommandDispatcher`] and never awaited or retried.

use std::path::Path;
use std::process::{Command, Stdio};

/// Width used when the terminal size cannot be queried
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Placeholder replaced by the repository path in terminal templates
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Current terminal width, or [`DEFAULT_LINE_WIDTH`] when stdout is not a
/// terminal
pub fn line_width() -> usize {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(width), _)) if width > 0 => width as usize,
        _ => {
            log::debug!(
                "Terminal size unavailable, using {} columns",
                DEFAULT_LINE_WIDTH
            );
            DEFAULT_LINE_WIDTH
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("No terminal command configured (set `terminal` in the [meta] section or GITMETA_TERMINAL)")]
    NotConfigured,

    #[error("Invalid terminal command template '{template}'")]
    InvalidTemplate { template: String },

    #[error("Failed to launch '{program}' for {}: {source}", path.display())]
    Spawn {
        program: String,
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl crate::core::error_handling::ContextualError for LaunchError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, LaunchError::Spawn { .. })
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// A fully resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the spawned process
    pub current_dir: std::path::PathBuf,
}

/// Starts external processes without waiting for them
pub trait CommandDispatcher {
    fn dispatch(&self, command: &LaunchCommand) -> Result<(), LaunchError>;
}

/// Spawns detached child processes with null stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessDispatcher;

impl CommandDispatcher for ProcessDispatcher {
    fn dispatch(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.current_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                path: command.current_dir.clone(),
                source,
            })
    }
}

/// Opens one terminal per repository from a command template
pub struct TerminalLauncher<D = ProcessDispatcher> {
    template: Option<String>,
    dispatcher: D,
}

impl TerminalLauncher<ProcessDispatcher> {
    pub fn new(template: Option<String>) -> Self {
        Self::with_dispatcher(template, ProcessDispatcher)
    }
}

impl<D: CommandDispatcher> TerminalLauncher<D> {
    pub fn with_dispatcher(template: Option<String>, dispatcher: D) -> Self {
        Self {
            template,
            dispatcher,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.template.is_some()
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn launch(&self, repository: &Path) -> Result<(), LaunchError> {
        let template = self.template.as_deref().ok_or(LaunchError::NotConfigured)?;
        let command = build_command(template, repository)?;
        log::debug!("Launching {:?} in {}", command, repository.display());
        self.dispatcher.dispatch(&command)
    }
}

/// Split `template` shell-style and substitute the repository path.
///
/// Every `{path}` is replaced by the repository path. The process always
/// starts in the repository, so templates without a placeholder still open
/// there.
pub fn build_command(template: &str, repository: &Path) -> Result<LaunchCommand, LaunchError> {
    let invalid = || LaunchError::InvalidTemplate {
        template: template.to_string(),
    };
    let words = shlex::split(template).ok_or_else(invalid)?;
    let path = repository.to_string_lossy();
    let mut words = words
        .into_iter()
        .map(|word| word.replace(PATH_PLACEHOLDER, &path));
    let program = words.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;

    Ok(LaunchCommand {
        program,
        args: words.collect(),
        current_dir: repository.to_path_buf(),
    })
}
