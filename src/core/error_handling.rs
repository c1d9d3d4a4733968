//! Error reporting shared by the startup sequence and the scan loop
//!
//! Errors that the user can fix (bad configuration file, repository that no
//! longer exists, registry in a read-only place) are reported with their own
//! message. Other errors are prefixed with the operation that failed.

use std::error::Error;

/// Errors that know whether the user can act on them
pub trait ContextualError: Error {
    /// True if the user can act on this error (fix a file, prune a path)
    fn is_user_actionable(&self) -> bool;

    /// Short message replacing the `Display` output, if any
    fn user_message(&self) -> Option<&str>;
}

/// Message shown to the user for `error` raised during `operation_context`
pub fn describe_error<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match (error.is_user_actionable(), error.user_message()) {
        (true, Some(message)) => format!("{}: {}", operation_context, message),
        (true, None) => error.to_string(),
        (false, _) => format!("{}: {}", operation_context, error),
    }
}

/// Log a fatal error, with its cause chain at debug level
///
/// ```rust,no_run
/// # use gitmeta::core::error_handling::log_error_with_context;
/// # use gitmeta::core::config::ConfigError;
/// let err = ConfigError::Missing { path: "/etc/gitmeta.toml".into() };
/// log_error_with_context(&err, "Loading configuration");
/// // Logs: "FATAL: The specified configuration file does not exist: /etc/gitmeta.toml"
/// ```
pub fn log_error_with_context<E: ContextualError>(error: &E, operation_context: &str) {
    log::error!("FATAL: {}", describe_error(error, operation_context));
    let mut cause = error.source();
    while let Some(inner) = cause {
        log::debug!("caused by: {}", inner);
        cause = inner.source();
    }
}
