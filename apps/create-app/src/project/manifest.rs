//! `package.json` handling.
//!
//! The manifest is edited as untyped JSON so that fields this tool knows
//! nothing about survive untouched and in their original order. Only the
//! `name` field is ever rewritten.

use crate::errors::CreateError;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the generated project's manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// A loaded `package.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageManifest {
    /// Loads the manifest in `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid JSON,
    /// or not a JSON object.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(CreateError::manifest_not_found(path).into());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| CreateError::manifest_malformed(&path, e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(CreateError::manifest_malformed(&path, "expected a JSON object").into());
        };

        Ok(Self { path, fields })
    }

    /// Returns the declared package name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Sets the declared package name.
    ///
    /// A manifest without a `name` field gets one appended.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields
            .insert(String::from("name"), Value::String(name.into()));
    }

    /// Serializes the manifest with two-space indentation and a trailing
    /// newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.fields)
            .context("Failed to serialize package.json")?;
        content.push('\n');
        Ok(content)
    }

    /// Writes the manifest back to the file it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        let content = self.to_json()?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write manifest: {}", self.path.display()))
    }
}

/// Rewrites the `name` field of the manifest in `root` to `app_name`.
///
/// # Errors
///
/// Returns an error if the manifest is missing or malformed, or cannot be
/// written back.
pub fn patch_manifest_name(root: &Path, app_name: &str) -> Result<()> {
    let mut manifest = PackageManifest::load(root)?;
    debug!(from = ?manifest.name(), to = app_name, "patching manifest name");
    manifest.set_name(app_name);
    manifest.save()
}
