//! Error type for plugin loading, classification and registration.
//!
//! None of these abort discovery. The scanner turns them into reports and
//! moves on to the next candidate.

use std::path::PathBuf;

use plugscan_core::error::AppError;
use thiserror::Error;

/// Recoverable outcomes of plugin discovery.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The dynamic loader refused to open the file.
    #[error("Couldn't load module {}: {reason}", path.display())]
    LoadFailed {
        /// File that failed to open.
        path: PathBuf,
        /// Loader error text.
        reason: String,
    },

    /// The module does not export the required `version` symbol.
    #[error("The plugin {name} has no version symbol")]
    MissingVersion {
        /// Plugin file name.
        name: String,
    },

    /// No registered plugin type claims the module.
    #[error("The plugin '{name}' has no registration routines")]
    NoRegistrationRoutines {
        /// Plugin file name.
        name: String,
    },

    /// A plugin with the same file name is already registered.
    #[error("The plugin '{name}' was found in multiple directories.")]
    DuplicateName {
        /// Plugin file name.
        name: String,
    },

    /// The classification mask has no room for another type.
    #[error(
        "At most {limit} plugin types can be supported, so the plugin type '{name}' won't be supported."
    )]
    TypeLimitExceeded {
        /// Rejected type name.
        name: String,
        /// Maximum number of types.
        limit: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::Io(e) => AppError::from(e),
            other => AppError::plugin(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugscan_core::error::ErrorKind;

    #[test]
    fn test_messages_match_reported_wording() {
        let err = PluginError::DuplicateName {
            name: "foo.so".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The plugin 'foo.so' was found in multiple directories."
        );

        let err = PluginError::TypeLimitExceeded {
            name: "extra".to_string(),
            limit: 32,
        };
        assert_eq!(
            err.to_string(),
            "At most 32 plugin types can be supported, so the plugin type 'extra' won't be supported."
        );
    }

    #[test]
    fn test_maps_into_app_error() {
        let err: AppError = PluginError::MissingVersion {
            name: "bar.so".to_string(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Plugin);

        let err: AppError = PluginError::Io(std::io::Error::other("boom")).into();
        assert_eq!(err.kind, ErrorKind::Storage);
    }
}
