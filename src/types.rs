//! Source descriptions for environment loading.
//!
//! An [`EnvSource`] says which file(s), if any, are read before the process
//! environment is layered on top:
//!
//! - **`NoFiles`**: nothing is read from disk. Useful for containers and CI,
//!   where everything arrives through real environment variables.
//! - **`SingleFile(path)`**: one explicit file.
//! - **`BaseWithOverride { root, overlay }`**: `{root}/.env`, then, when
//!   `overlay` is set, `{root}/.env.{overlay}` on top of it. This is the usual
//!   `.env` + `.env.development` arrangement.
//!
//! Missing files are never an error: listing a file is a suggestion, not a
//! requirement.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Flat string key to string value store. Later layers overwrite earlier ones.
pub type RawMapping = BTreeMap<String, String>;

/// Name of the base file read by [`EnvSource::BaseWithOverride`].
pub const BASE_FILE_NAME: &str = ".env";

/// Which files to read before the process environment is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvSource {
    /// No files; only defaults and the process environment.
    #[default]
    NoFiles,
    /// A single file at an explicit path.
    SingleFile(PathBuf),
    /// `{root}/.env` plus, optionally, `{root}/.env.{overlay}` (overlay wins).
    BaseWithOverride {
        root: PathBuf,
        overlay: Option<String>,
    },
}

impl EnvSource {
    pub fn single_file(path: impl Into<PathBuf>) -> Self {
        EnvSource::SingleFile(path.into())
    }

    pub fn base_with_override(root: impl Into<PathBuf>, overlay: Option<&str>) -> Self {
        EnvSource::BaseWithOverride {
            root: root.into(),
            overlay: overlay.map(str::to_string),
        }
    }

    /// Concrete file paths this source reads, in merge order (last = highest priority).
    pub fn files(&self) -> Vec<PathBuf> {
        match self {
            EnvSource::NoFiles => vec![],
            EnvSource::SingleFile(path) => vec![path.clone()],
            EnvSource::BaseWithOverride { root, overlay } => {
                let mut files = vec![root.join(BASE_FILE_NAME)];
                if let Some(name) = overlay {
                    files.push(root.join(format!("{BASE_FILE_NAME}.{name}")));
                }
                files
            }
        }
    }
}

/// A symbolic directory resolved to a concrete root at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRoot {
    /// Current working directory.
    Cwd,
    /// An explicit path.
    Path(PathBuf),
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(String),
    /// Platform config directory for the builder's app name
    /// (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
}

/// Which text format(s) to try when parsing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// JSON object of strings first, then `KEY=VALUE` lines.
    #[default]
    Auto,
    /// Only a JSON object whose values are all strings.
    Json,
    /// Only `KEY=VALUE` lines.
    Dotenv,
}

impl FileFormat {
    /// Short label used in log records.
    pub fn label(self) -> &'static str {
        match self {
            FileFormat::Auto => "json+dotenv",
            FileFormat::Json => "json",
            FileFormat::Dotenv => "dotenv",
        }
    }
}
