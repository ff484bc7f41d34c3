//! Error types for the create-app CLI.
//!
//! Pipeline stages return `anyhow::Result` and attach context as they go.
//! The variants of [`CreateError`] mark the failures `main` must report in a
//! specific way: user mistakes print their message alone, while filesystem
//! and installer failures are reported under a generic abort banner.

use std::path::PathBuf;
use thiserror::Error;

/// Consolidated error type for create-app operations.
#[derive(Debug, Error)]
pub enum CreateError {
    /// No project directory was given on the command line.
    #[error("please specify the project directory")]
    MissingProjectDirectory,

    /// The project name violates package registry naming rules.
    #[error(
        "could not create a project called \"{name}\" because of npm naming restrictions"
    )]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Every rule the name breaks, errors before warnings.
        violations: Vec<String>,
    },

    /// The target path exists but is not a directory.
    #[error("{} already exists and is not a directory", path.display())]
    NotADirectory {
        /// The conflicting path.
        path: PathBuf,
    },

    /// The user did not confirm reuse of an existing directory.
    #[error("directory {} already exists; aborting", path.display())]
    OverwriteDeclined {
        /// The existing directory.
        path: PathBuf,
    },

    /// Error reading or writing files.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O operation that failed.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The template did not produce a manifest in the project directory.
    #[error("manifest not found: {}", path.display())]
    ManifestNotFound {
        /// Where the manifest was expected.
        path: PathBuf,
    },

    /// The manifest is not a JSON object.
    #[error("malformed manifest {}: {message}", path.display())]
    ManifestMalformed {
        /// The manifest path.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The installer could not be started at all.
    #[error("failed to start `{command}`")]
    InstallerSpawn {
        /// The command line that was attempted.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The installer ran and exited unsuccessfully.
    #[error("`{command}` failed{}", code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    InstallFailed {
        /// The command line that failed, e.g. `npm install`.
        command: String,
        /// The exit code, if the process was not killed by a signal.
        code: Option<i32>,
    },
}

impl CreateError {
    /// Creates a new `InvalidName` error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, violations: Vec<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            violations,
        }
    }

    /// Creates a new `NotADirectory` error.
    #[must_use]
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Creates a new `OverwriteDeclined` error.
    #[must_use]
    pub fn overwrite_declined(path: impl Into<PathBuf>) -> Self {
        Self::OverwriteDeclined { path: path.into() }
    }

    /// Creates a new `Io` error from an I/O error with context.
    #[must_use]
    pub fn io_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new `ManifestNotFound` error.
    #[must_use]
    pub fn manifest_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Creates a new `ManifestMalformed` error.
    #[must_use]
    pub fn manifest_malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ManifestMalformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `InstallerSpawn` error.
    #[must_use]
    pub fn installer_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::InstallerSpawn {
            command: command.into(),
            source,
        }
    }

    /// Creates a new `InstallFailed` error.
    #[must_use]
    pub fn install_failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::InstallFailed {
            command: command.into(),
            code,
        }
    }

    /// Returns true for errors caused by the user's input rather than by
    /// the filesystem or the installer.
    ///
    /// These are reported without the abort banner.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectDirectory
                | Self::InvalidName { .. }
                | Self::NotADirectory { .. }
                | Self::OverwriteDeclined { .. }
        )
    }
}
