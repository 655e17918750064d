//! Realizing an [`EnvSource`] into a single merged [`RawMapping`].
//!
//! Every file named by the source is handed to the parser in merge order and
//! the results are layered with last-writer-wins. Nothing is cached: each call
//! re-reads the files. Because the parser is fail-open, loading a source never
//! fails; a missing or broken file simply contributes nothing.
//!
//! [`resolve_root`] turns a symbolic [`SearchRoot`] into the concrete
//! directory used by [`EnvSource::BaseWithOverride`].

use std::path::PathBuf;

use crate::error::EnvfigError;
use crate::merge::merge_overwriting;
use crate::parse;
use crate::types::{EnvSource, FileFormat, RawMapping, SearchRoot};

/// Load every file named by `source` and merge them (later files win).
pub fn load_source(source: &EnvSource, format: FileFormat) -> RawMapping {
    source
        .files()
        .iter()
        .map(|path| parse::load_file(path, format))
        .fold(RawMapping::new(), merge_overwriting)
}

/// Resolve a [`SearchRoot`] to a concrete directory.
///
/// `app_name` is only consulted for [`SearchRoot::Platform`].
pub fn resolve_root(root: &SearchRoot, app_name: Option<&str>) -> Result<PathBuf, EnvfigError> {
    match root {
        SearchRoot::Cwd => std::env::current_dir().map_err(|e| {
            EnvfigError::RootUnavailable(format!("current directory: {e}"))
        }),
        SearchRoot::Path(p) => Ok(p.clone()),
        SearchRoot::Home(subdir) => {
            let user = directories::UserDirs::new()
                .ok_or_else(|| EnvfigError::RootUnavailable("home directory not found".into()))?;
            Ok(user.home_dir().join(subdir))
        }
        SearchRoot::Platform => {
            let app_name = app_name.ok_or(EnvfigError::AppNameRequired)?;
            let proj = directories::ProjectDirs::from("", "", app_name).ok_or_else(|| {
                EnvfigError::RootUnavailable(format!("platform config directory for '{app_name}'"))
            })?;
            Ok(proj.config_dir().to_path_buf())
        }
    }
}
