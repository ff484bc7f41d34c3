//! Package name validation.
//!
//! Implements the npm registry naming rules. Violations come in two
//! severities:
//!
//! - **errors** make a name unusable for any package, old or new
//! - **warnings** are rules that only apply to newly published packages
//!
//! A project name is accepted only when it produces neither.

/// Maximum length of a new package name.
pub const MAX_NAME_LENGTH: usize = 214;

/// Names the registry refuses outright.
const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core module names. A package named after one of these would be
/// shadowed by the builtin.
pub const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Characters new package names may no longer contain.
const SPECIAL_CHARACTERS: &[char] = &['~', '\'', '!', '(', ')', '*'];

/// Outcome of validating a package name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameValidation {
    /// Rule violations that make the name unusable for any package.
    pub errors: Vec<String>,
    /// Rule violations that only apply to new packages.
    pub warnings: Vec<String>,
}

impl NameValidation {
    /// Returns true if the name may be used for a new package.
    #[must_use]
    pub fn is_valid_for_new_packages(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Iterates over all violations, errors first.
    pub fn violations(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .map(String::as_str)
    }
}

/// Validates `name` against the npm registry naming rules.
#[must_use]
pub fn validate_package_name(name: &str) -> NameValidation {
    let mut result = NameValidation::default();

    if name.is_empty() {
        result
            .errors
            .push(String::from("name length must be greater than zero"));
        return result;
    }

    if name.starts_with('.') {
        result
            .errors
            .push(String::from("name cannot start with a period"));
    }

    if name.starts_with('_') {
        result
            .errors
            .push(String::from("name cannot start with an underscore"));
    }

    if name.trim() != name {
        result
            .errors
            .push(String::from("name cannot contain leading or trailing spaces"));
    }

    let lower = name.to_lowercase();
    if let Some(blacklisted) = BLACKLIST.iter().find(|b| **b == lower) {
        result
            .errors
            .push(format!("{blacklisted} is a blacklisted name"));
    }

    if CORE_MODULES.contains(&lower.as_str()) {
        result.warnings.push(format!("{name} is a core module name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        result.warnings.push(format!(
            "name can no longer contain more than {MAX_NAME_LENGTH} characters"
        ));
    }

    if lower != name {
        result
            .warnings
            .push(String::from("name can no longer contain capital letters"));
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(SPECIAL_CHARACTERS) {
        result.warnings.push(String::from(
            "name can no longer contain special characters (\"~'!()*\")",
        ));
    }

    if !is_url_friendly(name) {
        result
            .errors
            .push(String::from("name can only contain URL-friendly characters"));
    }

    result
}

/// Returns true if `name` survives URI component encoding unchanged, or is
/// a scoped name (`@scope/pkg`) whose two halves both do.
fn is_url_friendly(name: &str) -> bool {
    if name.chars().all(is_unreserved) {
        return true;
    }

    let Some(scoped) = name.strip_prefix('@') else {
        return false;
    };
    match scoped.split_once('/') {
        Some((scope, package)) => {
            !scope.is_empty()
                && !package.is_empty()
                && scope.chars().all(is_unreserved)
                && package.chars().all(is_unreserved)
        }
        None => false,
    }
}

/// Characters left untouched by `encodeURIComponent`.
fn is_unreserved(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "-_.!~*'()".contains(ch)
}
