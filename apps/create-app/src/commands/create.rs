//! The project creation pipeline.
//!
//! ## Usage
//!
//! ```bash
//! create-app my-app                      # Create ./my-app and install with yarn or npm
//! create-app my-app --use-npm            # Always install with npm
//! create-app my-app --git                # Initialize a git repository first
//! create-app my-app --skip-install       # Copy and patch only
//! create-app my-app --template ./starter # Copy from a template directory
//! ```
//!
//! ## Stages
//!
//! 1. **Validate** - the package name must satisfy npm naming rules
//! 2. **Resolve** - create the project directory, or confirm reuse of it
//! 3. **Copy** - materialize the template into the project directory
//! 4. **Patch** - set `name` in the copied `package.json`
//! 5. **Install** - run the package manager in the project directory
//!
//! Each stage returns a `Result`; the first error ends the run.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{
    RunConfig, RunOptions, SKIP_INSTALL_ENV, TEMPLATE_ENV, USE_NPM_ENV, locate,
};
use crate::errors::CreateError;
use crate::project::{
    Installer, LinePrompt, Prompt, materialize, patch_manifest_name, resolve_directory,
    run_install, validate_package_name,
};

/// Arguments for creating a project.
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Directory to create the project in.
    ///
    /// Its final path component becomes the package name and must satisfy
    /// npm naming rules: lowercase, URL-safe, not a Node.js core module.
    #[arg(value_name = "PROJECT_DIRECTORY")]
    pub project_directory: Option<String>,

    /// Install dependencies with npm even if yarn is available.
    #[arg(long = "use-npm", env = USE_NPM_ENV, action = clap::ArgAction::SetTrue)]
    pub use_npm: bool,

    /// Initialize a git repository in the new project before copying files.
    #[arg(long = "git", action = clap::ArgAction::SetTrue)]
    pub git: bool,

    /// Do not install dependencies after creating the project.
    #[arg(long = "skip-install", env = SKIP_INSTALL_ENV, action = clap::ArgAction::SetTrue)]
    pub skip_install: bool,

    /// Copy starter files from this directory instead of the bundled template.
    #[arg(long = "template", value_name = "DIR", env = TEMPLATE_ENV)]
    pub template: Option<PathBuf>,
}

/// Executes the creation pipeline.
///
/// # Errors
///
/// Returns an error if:
/// - No project directory was given
/// - The package name is invalid
/// - The target exists as a file, or the user declines to reuse a directory
/// - Copying the template or patching the manifest fails
/// - The installer cannot be started or exits unsuccessfully
pub async fn execute(args: &CreateArgs) -> Result<()> {
    let Some(project_name) = args.project_directory.as_deref() else {
        return Err(CreateError::MissingProjectDirectory.into());
    };

    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let (_, app_name) = locate(project_name, &cwd)?;
    check_name(&app_name)?;

    let installer = Installer::detect(args.use_npm).await;
    let options = RunOptions {
        template: args.template.clone(),
        init_git: args.git,
        skip_install: args.skip_install,
    };
    let config = RunConfig::resolve(project_name, &cwd, installer, options)?;
    debug!(?config, "resolved run configuration");

    create(&config, &mut LinePrompt::stdio()).await?;
    print_next_steps(&config);
    Ok(())
}

/// Runs every stage for an already resolved configuration.
///
/// # Errors
///
/// Returns the first stage error; later stages do not run.
pub async fn create<P: Prompt>(config: &RunConfig, prompt: &mut P) -> Result<()> {
    check_name(&config.app_name)?;

    resolve_directory(&config.root, &config.project_name, prompt)?;

    println!("Creating a new app in {}.", config.root.display());
    println!();
    materialize(&config.template, &config.root, config.init_git)?;
    patch_manifest_name(&config.root, &config.app_name)?;

    if config.skip_install {
        debug!("skipping dependency installation");
        return Ok(());
    }

    let command = config.installer.install_command();
    println!(
        "Installing packages with `{}`. This might take a couple of minutes.",
        command.display()
    );
    println!();
    run_install(&command, &config.root).await
}

/// Rejects names that break npm naming rules.
fn check_name(app_name: &str) -> Result<()> {
    let validation = validate_package_name(app_name);
    if validation.is_valid_for_new_packages() {
        return Ok(());
    }

    let violations = validation.violations().map(String::from).collect();
    Err(CreateError::invalid_name(app_name, violations).into())
}

fn print_next_steps(config: &RunConfig) {
    println!();
    println!("Success! Created {} at {}", config.app_name, config.root.display());
    println!();
    println!("Next steps:");
    println!("  cd {}", config.project_name);
    if config.skip_install {
        println!("  {}", config.installer.install_command().display());
    }
    println!("  {}", config.installer.start_command());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Template;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("create_app_cmd_{}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_dir_all(path);
    }

    fn config_in(parent: &Path, name: &str) -> RunConfig {
        let options = RunOptions {
            skip_install: true,
            ..RunOptions::default()
        };
        RunConfig::resolve(name, parent, Installer::Npm, options).unwrap()
    }

    /// Answers every question the same way and counts them.
    struct Scripted {
        answer: bool,
        asked: usize,
    }

    impl Prompt for Scripted {
        fn confirm(&mut self, _question: &str) -> Result<bool> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    fn answering(answer: bool) -> Scripted {
        Scripted { answer, asked: 0 }
    }

    fn manifest_name(root: &Path) -> String {
        let content = fs::read_to_string(root.join("package.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        value["name"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn creates_project_in_missing_directory() {
        let parent = temp_dir();
        let config = config_in(&parent, "my-app");
        let mut prompt = answering(false);

        create(&config, &mut prompt).await.unwrap();

        assert_eq!(prompt.asked, 0);
        assert!(config.root.is_dir());
        assert_eq!(manifest_name(&config.root), "my-app");

        cleanup(&parent);
    }

    #[tokio::test]
    async fn invalid_name_stops_before_touching_disk() {
        let parent = temp_dir();
        let config = config_in(&parent, "Bad_Name");
        let mut prompt = answering(true);

        let err = create(&config, &mut prompt).await.unwrap_err();

        match err.downcast_ref::<CreateError>() {
            Some(CreateError::InvalidName { name, violations }) => {
                assert_eq!(name, "Bad_Name");
                assert_eq!(violations, &["name can no longer contain capital letters"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!config.root.exists());
        assert_eq!(prompt.asked, 0);

        cleanup(&parent);
    }

    #[tokio::test]
    async fn declined_overwrite_copies_nothing() {
        let parent = temp_dir();
        let config = config_in(&parent, "existing");
        fs::create_dir_all(&config.root).unwrap();

        let err = create(&config, &mut answering(false)).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CreateError>(),
            Some(CreateError::OverwriteDeclined { .. })
        ));
        assert_eq!(fs::read_dir(&config.root).unwrap().count(), 0);

        cleanup(&parent);
    }

    #[tokio::test]
    async fn confirmed_overwrite_keeps_unrelated_files() {
        let parent = temp_dir();
        let config = config_in(&parent, "existing");
        fs::create_dir_all(&config.root).unwrap();
        fs::write(config.root.join("notes.txt"), "keep me").unwrap();
        let mut prompt = answering(true);

        create(&config, &mut prompt).await.unwrap();

        assert_eq!(prompt.asked, 1);
        assert_eq!(
            fs::read_to_string(config.root.join("notes.txt")).unwrap(),
            "keep me"
        );
        assert_eq!(manifest_name(&config.root), "existing");

        cleanup(&parent);
    }

    #[tokio::test]
    async fn file_in_the_way_is_a_conflict() {
        let parent = temp_dir();
        let config = config_in(&parent, "taken");
        fs::write(&config.root, "file").unwrap();

        let err = create(&config, &mut answering(true)).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CreateError>(),
            Some(CreateError::NotADirectory { .. })
        ));
        assert!(config.root.is_file());

        cleanup(&parent);
    }

    #[tokio::test]
    async fn template_without_manifest_fails_after_copy() {
        let parent = temp_dir();
        let template = parent.join("bare-template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("README.md"), "# bare").unwrap();
        let mut config = config_in(&parent, "from-bare");
        config.template = Template::Directory(template);

        let err = create(&config, &mut answering(false)).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CreateError>(),
            Some(CreateError::ManifestNotFound { .. })
        ));
        assert!(config.root.join("README.md").exists());

        cleanup(&parent);
    }

    #[test]
    fn check_name_accepts_valid_names() {
        assert!(check_name("my-app").is_ok());
        assert!(check_name("fs").is_err());
    }
}
