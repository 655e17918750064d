use std::collections::BTreeSet;

use crate::env;
use crate::environment::Environment;
use crate::error::EnvfigError;
use crate::file;
use crate::resolve::{self, ResolveInput};
use crate::types::{EnvSource, FileFormat, RawMapping, SearchRoot};

/// Entry point for building an [`Environment`].
pub struct Envfig;

impl Envfig {
    pub fn builder() -> EnvfigBuilder {
        EnvfigBuilder::new()
    }
}

impl Environment {
    /// Load `source`, layer the live process environment on top, and check
    /// `required_keys`. Shorthand for the [`EnvfigBuilder`] defaults.
    pub fn live<I, K>(source: EnvSource, required_keys: I) -> Result<Environment, EnvfigError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Envfig::builder()
            .source(source)
            .required_keys(required_keys)
            .load()
    }
}

/// Where the file layer comes from: a concrete source, or a base/override
/// pair whose root is resolved at load time.
#[derive(Debug, Clone, PartialEq)]
enum SourceSpec {
    Resolved(EnvSource),
    Rooted {
        root: SearchRoot,
        overlay: Option<String>,
    },
}

/// Builder for assembling an [`Environment`] from defaults, files and the
/// process environment.
///
/// Precedence, lowest to highest: defaults, file source, process environment.
/// The builder is `Clone`, so the same recipe can be re-run (see
/// [`SharedEnvironment::from_builder`](crate::SharedEnvironment::from_builder)).
#[derive(Debug, Clone)]
pub struct EnvfigBuilder {
    app_name: Option<String>,
    source: SourceSpec,
    format: FileFormat,
    defaults: RawMapping,
    required_keys: BTreeSet<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
}

impl EnvfigBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            source: SourceSpec::Resolved(EnvSource::NoFiles),
            format: FileFormat::default(),
            defaults: RawMapping::new(),
            required_keys: BTreeSet::new(),
            env_enabled: true,
            env_vars: None,
        }
    }

    /// Set the application name. Only needed for [`SearchRoot::Platform`].
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Set the file source (default: [`EnvSource::NoFiles`]).
    pub fn source(mut self, source: EnvSource) -> Self {
        self.source = SourceSpec::Resolved(source);
        self
    }

    /// Read `.env` (and `.env.{overlay}`) from a symbolic root directory,
    /// resolved when [`load`](Self::load) runs.
    pub fn rooted(mut self, root: SearchRoot, overlay: Option<&str>) -> Self {
        self.source = SourceSpec::Rooted {
            root,
            overlay: overlay.map(str::to_string),
        };
        self
    }

    /// Choose which file format(s) to try (default: [`FileFormat::Auto`]).
    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the required-key set.
    pub fn required_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Add one required key.
    pub fn require(mut self, key: &str) -> Self {
        self.required_keys.insert(key.to_string());
        self
    }

    /// Add default values (the lowest-priority layer). Later calls win.
    pub fn defaults<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.defaults
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn default_value(mut self, key: &str, value: &str) -> Self {
        self.defaults.insert(key.to_string(), value.to_string());
        self
    }

    /// Disable the process-environment layer entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these variables instead of the live process environment.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Resolve the concrete file source.
    fn effective_source(&self) -> Result<EnvSource, EnvfigError> {
        match &self.source {
            SourceSpec::Resolved(source) => Ok(source.clone()),
            SourceSpec::Rooted { root, overlay } => {
                let root = file::resolve_root(root, self.app_name.as_deref())?;
                Ok(EnvSource::BaseWithOverride {
                    root,
                    overlay: overlay.clone(),
                })
            }
        }
    }

    /// Snapshot the env layer (None if disabled).
    fn effective_env_vars(&self) -> Option<RawMapping> {
        if !self.env_enabled {
            return None;
        }
        Some(match &self.env_vars {
            Some(vars) => env::vars_to_mapping(vars.iter().cloned()),
            None => env::process_env(),
        })
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(&self) -> Result<ResolveInput, EnvfigError> {
        let source = self.effective_source()?;
        let files = file::load_source(&source, self.format);

        Ok(ResolveInput {
            defaults: self.defaults.clone(),
            files,
            env_vars: self.effective_env_vars(),
            required_keys: self.required_keys.clone(),
        })
    }

    /// Load and merge all layers.
    ///
    /// Any failure, whether resolving the source root or a missing required
    /// key, is logged and returned as [`EnvfigError::InitializationFailed`].
    pub fn load(self) -> Result<Environment, EnvfigError> {
        self.build_input()
            .and_then(resolve::resolve)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to initialize environment");
                e.into_initialization_failure()
            })
    }
}
