//! Run configuration.
//!
//! Everything a run needs is resolved once, up front, into a [`RunConfig`]
//! that is then passed by reference to each pipeline stage. Nothing in it
//! changes after construction.

use crate::project::{Installer, Template};
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Environment variable holding the log filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "CREATE_APP_LOG";

/// Environment variable equivalent of `--use-npm`.
pub const USE_NPM_ENV: &str = "CREATE_APP_USE_NPM";

/// Environment variable equivalent of `--skip-install`.
pub const SKIP_INSTALL_ENV: &str = "CREATE_APP_SKIP_INSTALL";

/// Environment variable equivalent of `--template`.
pub const TEMPLATE_ENV: &str = "CREATE_APP_TEMPLATE";

/// Immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// The project directory exactly as given on the command line.
    pub project_name: String,
    /// Absolute path of the project directory.
    pub root: PathBuf,
    /// Final component of `root`; becomes the package name.
    pub app_name: String,
    /// Package manager used for the install step.
    pub installer: Installer,
    /// Where the starter files come from.
    pub template: Template,
    /// Run `git init` before copying the template.
    pub init_git: bool,
    /// Stop after patching the manifest.
    pub skip_install: bool,
}

/// Switches that do not depend on the project directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Template directory on disk, if not using the bundled template.
    pub template: Option<PathBuf>,
    /// Run `git init` in the new project.
    pub init_git: bool,
    /// Skip the install step.
    pub skip_install: bool,
}

impl RunConfig {
    /// Resolves `project_name` against `cwd` and derives the package name.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved path has no final component to use
    /// as a package name (e.g. `/`), or if that component is not UTF-8.
    pub fn resolve(
        project_name: &str,
        cwd: &Path,
        installer: Installer,
        options: RunOptions,
    ) -> Result<Self> {
        let (root, app_name) = locate(project_name, cwd)?;

        Ok(Self {
            project_name: project_name.to_string(),
            root,
            app_name,
            installer,
            template: Template::from_path(options.template),
            init_git: options.init_git,
            skip_install: options.skip_install,
        })
    }
}

/// Resolves `project_name` against `cwd`, returning the project root and
/// the package name taken from its final component.
///
/// # Errors
///
/// Returns an error if the resolved path has no UTF-8 final component.
pub fn locate(project_name: &str, cwd: &Path) -> Result<(PathBuf, String)> {
    let root = normalize(&cwd.join(project_name));
    let app_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .with_context(|| {
            format!(
                "Could not determine a project name from '{}'",
                root.display()
            )
        })?;
    Ok((root, app_name))
}

/// Lexically removes `.` and `..` components without touching the
/// filesystem, the way a shell resolves `cd` targets.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str, cwd: &str) -> Result<RunConfig> {
        RunConfig::resolve(name, Path::new(cwd), Installer::Npm, RunOptions::default())
    }

    #[cfg(unix)]
    #[test]
    fn resolves_relative_name_against_cwd() {
        let config = resolve("my-app", "/home/user/projects").unwrap();
        assert_eq!(config.project_name, "my-app");
        assert_eq!(config.root, PathBuf::from("/home/user/projects/my-app"));
        assert_eq!(config.app_name, "my-app");
        assert_eq!(config.template, Template::Bundled);
        assert!(!config.init_git);
        assert!(!config.skip_install);
    }

    #[cfg(unix)]
    #[test]
    fn app_name_is_base_name_of_nested_path() {
        let config = resolve("./apps/../clients/web-app/", "/work").unwrap();
        assert_eq!(config.root, PathBuf::from("/work/clients/web-app"));
        assert_eq!(config.app_name, "web-app");
        assert_eq!(config.project_name, "./apps/../clients/web-app/");
    }

    #[cfg(unix)]
    #[test]
    fn absolute_name_ignores_cwd() {
        let config = resolve("/tmp/absolute-app", "/work").unwrap();
        assert_eq!(config.root, PathBuf::from("/tmp/absolute-app"));
        assert_eq!(config.app_name, "absolute-app");
    }

    #[cfg(unix)]
    #[test]
    fn root_path_has_no_app_name() {
        let err = resolve("/", "/work").unwrap_err();
        assert!(err.to_string().contains("Could not determine a project name"));
    }

    #[cfg(unix)]
    #[test]
    fn locate_matches_resolve() {
        let (root, app_name) = locate("clients/web-app", Path::new("/work")).unwrap();
        let config = resolve("clients/web-app", "/work").unwrap();
        assert_eq!(root, config.root);
        assert_eq!(app_name, config.app_name);
    }

    #[cfg(unix)]
    #[test]
    fn options_carry_through() {
        let options = RunOptions {
            template: Some(PathBuf::from("/templates/basic")),
            init_git: true,
            skip_install: true,
        };
        let config =
            RunConfig::resolve("app", Path::new("/work"), Installer::Yarn, options).unwrap();
        assert_eq!(
            config.template,
            Template::Directory(PathBuf::from("/templates/basic"))
        );
        assert_eq!(config.installer, Installer::Yarn);
        assert!(config.init_git);
        assert!(config.skip_install);
    }
}
