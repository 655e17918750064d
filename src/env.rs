use std::ffi::OsString;

use crate::types::RawMapping;

/// Snapshot the live process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped rather than
/// aborting the load.
pub fn process_env() -> RawMapping {
    os_vars_to_mapping(std::env::vars_os())
}

/// Build a mapping from already-decoded variable pairs. Later duplicates win.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn vars_to_mapping(vars: impl IntoIterator<Item = (String, String)>) -> RawMapping {
    vars.into_iter().collect()
}

fn os_vars_to_mapping(vars: impl IntoIterator<Item = (OsString, OsString)>) -> RawMapping {
    let mut mapping = RawMapping::new();
    for (key, value) in vars {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                mapping.insert(key, value);
            }
            (Ok(key), Err(_)) => {
                tracing::debug!(key = %key, "skipping environment variable with non-UTF-8 value");
            }
            (Err(key), _) => {
                tracing::debug!(key = ?key, "skipping environment variable with non-UTF-8 name");
            }
        }
    }
    mapping
}
