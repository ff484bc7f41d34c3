//! Project creation stages.
//!
//! Each module is one step of the pipeline driven by
//! [`crate::commands::create`]:
//!
//! - [`name`] - package registry naming rules
//! - [`directory`] - creating or confirming the project root
//! - [`template`] - copying the starter files
//! - [`manifest`] - rewriting the `package.json` name
//! - [`install`] - running the package manager

pub mod directory;
pub mod install;
pub mod manifest;
pub mod name;
pub mod template;

pub use directory::{LinePrompt, Prompt, resolve_directory};
pub use install::{Installer, run_install};
pub use manifest::patch_manifest_name;
pub use name::validate_package_name;
pub use template::{Template, materialize};
