//! Repository Error Types

use std::path::PathBuf;

/// Errors raised while opening or inspecting a single repository
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepoError {
    /// Path does not open as a repository (deleted, corrupted or never was one)
    #[error("{} is not a valid repository: {message}", path.display())]
    InvalidRepository { path: PathBuf, message: String },

    /// A primitive of the version-control engine failed on an open repository
    #[error("Repository engine error: {message}")]
    Engine { message: String },
}

impl RepoError {
    pub fn invalid(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        RepoError::InvalidRepository {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn engine(message: impl ToString) -> Self {
        RepoError::Engine {
            message: message.to_string(),
        }
    }

    pub fn is_invalid_repository(&self) -> bool {
        matches!(self, RepoError::InvalidRepository { .. })
    }
}

impl crate::core::error_handling::ContextualError for RepoError {
    fn is_user_actionable(&self) -> bool {
        match self {
            RepoError::InvalidRepository { .. } => true, // User can prune or re-discover
            RepoError::Engine { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            RepoError::InvalidRepository { message, .. } => Some(message.as_str()),
            RepoError::Engine { .. } => None,
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
