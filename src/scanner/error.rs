//! Scanner Error Types

use std::path::PathBuf;

/// Reading or writing the registry file failed
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Cannot read registry {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write registry {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            RegistryError::Read { path, .. } | RegistryError::Write { path, .. } => path,
        }
    }
}

impl crate::core::error_handling::ContextualError for RegistryError {
    fn is_user_actionable(&self) -> bool {
        // Permissions and missing directories are fixable by the user
        matches!(
            self,
            RegistryError::Read { source, .. } | RegistryError::Write { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied
        )
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
