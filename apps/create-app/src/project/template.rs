//! Template materialization.
//!
//! Copies a template tree into the project root, preserving relative
//! structure and file contents byte for byte. The default template is the
//! `template/` directory next to this crate's manifest, embedded into the
//! binary at compile time; `--template` swaps in a directory on disk.
//!
//! Copying is not transactional: an error part way through leaves the files
//! written so far in place. Existing files are overwritten.

use crate::errors::CreateError;
use anyhow::{Context, Result, bail};
use include_dir::{Dir, DirEntry, include_dir};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// The template shipped with the binary.
static BUNDLED_TEMPLATE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/template");

/// Where template files are copied from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// The template embedded in the binary.
    Bundled,
    /// A template directory on disk.
    Directory(PathBuf),
}

impl Template {
    /// Selects a directory template if `path` is given, the bundled one
    /// otherwise.
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Bundled, Self::Directory)
    }
}

/// Copies `template` into `root`, optionally running `git init` first.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns an error if a directory template does not exist or any file or
/// directory cannot be read or written.
pub fn materialize(template: &Template, root: &Path, init_git: bool) -> Result<usize> {
    if init_git {
        init_git_repository(root);
    }

    let copied = match template {
        Template::Bundled => copy_embedded(&BUNDLED_TEMPLATE, root)?,
        Template::Directory(source) => copy_directory(source, root)?,
    };

    debug!(root = %root.display(), files = copied, "template copied");
    Ok(copied)
}

/// Writes every entry of an embedded directory beneath `root`.
fn copy_embedded(dir: &Dir<'_>, root: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in dir.entries() {
        let target = root.join(entry.path());
        match entry {
            DirEntry::Dir(sub) => {
                create_dir(&target)?;
                copied += copy_embedded(sub, root)?;
            }
            DirEntry::File(file) => {
                std::fs::write(&target, file.contents()).map_err(|e| {
                    CreateError::io_error(format!("failed to write {}", target.display()), e)
                })?;
                copied += 1;
            }
        }
    }
    Ok(copied)
}

/// Recursively copies the directory `source` into `root`.
fn copy_directory(source: &Path, root: &Path) -> Result<usize> {
    if !source.is_dir() {
        bail!("Template directory not found: {}", source.display());
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read template directory: {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Template entry outside the template directory")?;
        let target = root.join(relative);

        if entry.file_type().is_dir() {
            create_dir(&target)?;
        } else {
            std::fs::copy(entry.path(), &target).map_err(|e| {
                CreateError::io_error(
                    format!(
                        "failed to copy {} to {}",
                        entry.path().display(),
                        target.display()
                    ),
                    e,
                )
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .map_err(|e| CreateError::io_error(format!("failed to create {}", path.display()), e))?;
    Ok(())
}

/// Initializes a git repository in the project directory.
///
/// Logs a warning if git initialization fails rather than returning an
/// error, as git is optional.
fn init_git_repository(root: &Path) {
    let result = Command::new("git").arg("init").current_dir(root).output();

    match result {
        Ok(output) if output.status.success() => {
            debug!(root = %root.display(), "initialized git repository");
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "git init failed: {}. Project created without git repository.",
                stderr.trim()
            );
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("git not found. Project created without git repository.");
        }
        Err(e) => {
            warn!("failed to run git: {e}. Project created without git repository.");
        }
    }
}
