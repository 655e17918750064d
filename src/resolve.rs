//! Core resolution pipeline: layer the pre-loaded mappings and build the container.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! precedence logic testable with synthetic inputs. Lowest to highest priority:
//!
//! 1. Defaults
//! 2. File-derived values
//! 3. Process environment (if enabled)
//!
//! The merged mapping is then checked against the required keys.

use std::collections::BTreeSet;

use crate::environment::Environment;
use crate::error::EnvfigError;
use crate::merge::merge_overwriting;
use crate::types::RawMapping;

/// All pre-loaded data needed to assemble an environment. No I/O happens here.
pub struct ResolveInput {
    /// Built-in defaults, the lowest layer.
    pub defaults: RawMapping,
    /// The merged result of the configured source's files.
    pub files: RawMapping,
    /// Process environment snapshot. `None` means the env layer is disabled.
    pub env_vars: Option<RawMapping>,
    /// Keys that must be present after merging.
    pub required_keys: BTreeSet<String>,
}

/// Merge the layers and construct the [`Environment`].
pub fn resolve(input: ResolveInput) -> Result<Environment, EnvfigError> {
    let mut merged = merge_overwriting(input.defaults, input.files);

    if let Some(env_vars) = input.env_vars {
        merged = merge_overwriting(merged, env_vars);
    }

    Environment::new(merged, input.required_keys)
}
