//! Clap adapter for envfig.
//!
//! This module is the **optional integration layer** between envfig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`EnvArgs`] is a clap derive struct you flatten into your own parser to let
//! users pick which env files to read. The only bridge to the core is
//! [`EnvArgs::into_source()`], which converts the parsed flags into an
//! [`EnvSource`](crate::EnvSource).

use std::path::PathBuf;

use clap::Args;

use crate::types::EnvSource;

/// Clap-derived flags selecting the env file source.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     env: EnvArgs,
/// }
/// ```
#[derive(Debug, Clone, Default, Args)]
pub struct EnvArgs {
    /// Read a single env file (JSON object or KEY=VALUE lines).
    #[arg(long, value_name = "PATH", global = true, conflicts_with_all = ["env_dir", "env"])]
    pub env_file: Option<PathBuf>,

    /// Directory holding `.env` and `.env.<name>` files (default: current directory).
    #[arg(long, value_name = "DIR", global = true)]
    pub env_dir: Option<PathBuf>,

    /// Environment name; `.env.<name>` overrides `.env`.
    #[arg(long = "env", value_name = "NAME", global = true)]
    pub env: Option<String>,
}

impl EnvArgs {
    /// Convert clap-parsed flags into an [`EnvSource`].
    ///
    /// - `--env-file` → `SingleFile`.
    /// - `--env-dir` and/or `--env` → `BaseWithOverride` (root defaults to `.`).
    /// - no flags → `NoFiles`.
    pub fn into_source(self) -> EnvSource {
        if let Some(path) = self.env_file {
            return EnvSource::SingleFile(path);
        }
        if self.env_dir.is_none() && self.env.is_none() {
            return EnvSource::NoFiles;
        }
        EnvSource::BaseWithOverride {
            root: self.env_dir.unwrap_or_else(|| PathBuf::from(".")),
            overlay: self.env,
        }
    }
}
