//! Target directory resolution.
//!
//! Makes sure the project root exists before anything is copied into it.
//! A missing root is created; an existing directory is reused only after the
//! user confirms; anything else at that path is a conflict.

use crate::errors::CreateError;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// The only answer that confirms reuse of an existing directory.
pub const AFFIRMATIVE: &str = "y";

/// How the project root came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// The directory was created by this run.
    Created,
    /// The directory already existed and the user agreed to reuse it.
    Reused,
}

/// Ensures `root` exists as a directory.
///
/// If `root` is already a directory, `prompt` is asked whether to continue.
/// Existing contents are left in place either way; files may later be
/// overwritten by the template copy.
///
/// # Errors
///
/// Returns an error if:
/// - `root` exists and is not a directory
/// - the user declines to reuse an existing directory
/// - the directory cannot be created
pub fn resolve_directory<P: Prompt>(
    root: &Path,
    display_name: &str,
    prompt: &mut P,
) -> Result<DirectoryState> {
    // Follows symlinks: a link to a directory counts as a directory.
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => {
            let question = format!(
                "Directory {display_name} already exists. \
                 Overwriting may replace existing files. Continue? (y/N) "
            );
            if prompt.confirm(&question)? {
                debug!(root = %root.display(), "reusing existing directory");
                Ok(DirectoryState::Reused)
            } else {
                Err(CreateError::overwrite_declined(root).into())
            }
        }
        Ok(_) => Err(CreateError::not_a_directory(root).into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            std::fs::create_dir_all(root).with_context(|| {
                format!("Failed to create project directory: {}", root.display())
            })?;
            debug!(root = %root.display(), "created project directory");
            Ok(DirectoryState::Created)
        }
        Err(e) => Err(CreateError::io_error(
            format!("failed to inspect {}", root.display()),
            e,
        )
        .into()),
    }
}

/// A yes/no question asked of the user.
pub trait Prompt {
    /// Asks `question` and returns true only for an affirmative answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be written or the answer
    /// cannot be read.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Line-based prompt over a reader and a writer.
///
/// Reads a single line with no timeout. End of input counts as a refusal.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Creates a prompt reading answers from `input` and writing questions
    /// to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Creates a prompt on the process's standard streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question}").context("Failed to write prompt")?;
        self.output.flush().context("Failed to write prompt")?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .context("Failed to read answer from standard input")?;

        Ok(is_affirmative(&answer))
    }
}

/// Returns true if `answer`, minus its line terminator, is exactly the
/// affirmative token.
fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\n', '\r']) == AFFIRMATIVE
}
