//! Command implementations for the create-app CLI.
//!
//! - [`create`] - Validate, scaffold, and install a new project

pub mod create;
