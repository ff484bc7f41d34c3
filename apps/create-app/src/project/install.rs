//! Dependency installation.
//!
//! After the template is in place, the project's dependencies are fetched
//! by an external package manager. yarn is used when it is callable, npm
//! otherwise (or always, with `--use-npm`).
//!
//! The installer inherits the standard streams so its progress output is
//! shown live, and runs with the project root as its working directory.
//! This process's own working directory is never changed.

use crate::errors::CreateError;
use anyhow::Result;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A supported package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installer {
    /// npm, shipped with Node.js.
    Npm,
    /// yarn.
    Yarn,
}

impl Installer {
    /// Picks the installer for this run.
    ///
    /// Returns [`Installer::Npm`] when `prefer_npm` is set; otherwise probes
    /// whether `yarn --version` runs successfully.
    pub async fn detect(prefer_npm: bool) -> Self {
        if prefer_npm {
            return Self::Npm;
        }
        if probe(Self::Yarn.program()).await {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    /// Executable name.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// The command that installs a project's dependencies.
    #[must_use]
    pub fn install_command(self) -> InstallCommand {
        InstallCommand::new(self.program(), ["install"])
    }

    /// The command a user runs to start the generated app.
    #[must_use]
    pub fn start_command(self) -> &'static str {
        match self {
            Self::Npm => "npm start",
            Self::Yarn => "yarn start",
        }
    }
}

impl fmt::Display for Installer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Returns true if `program --version` can be run and exits successfully.
///
/// Output is discarded.
async fn probe(program: &str) -> bool {
    let Ok(path) = which::which(program) else {
        debug!(program, "not found in PATH");
        return false;
    };

    let status = Command::new(&path)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    let available = matches!(status, Ok(s) if s.success());
    debug!(program, path = %path.display(), available, "probed installer");
    available
}

/// An installer invocation: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    program: String,
    args: Vec<String>,
}

impl InstallCommand {
    /// Creates a command from a program name and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The command line as shown to the user, e.g. `npm install`.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolves the program through `PATH`, so that wrappers such as
    /// `npm.cmd` on Windows are found. Falls back to the bare name.
    fn resolved_program(&self) -> OsString {
        which::which(&self.program)
            .map_or_else(|_| OsString::from(&self.program), Into::into)
    }
}

/// Runs `command` in `root` and waits for it to exit.
///
/// # Errors
///
/// Returns [`CreateError::InstallerSpawn`] if the process cannot be started
/// and [`CreateError::InstallFailed`] if it exits unsuccessfully.
pub async fn run_install(command: &InstallCommand, root: &Path) -> Result<()> {
    let command_line = command.display();
    debug!(command = %command_line, cwd = %root.display(), "running installer");

    let status = Command::new(command.resolved_program())
        .args(&command.args)
        .current_dir(root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| CreateError::installer_spawn(&command_line, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(CreateError::install_failed(command_line, status.code()).into())
    }
}
