//! Parsing a single environment file into a flat [`RawMapping`].
//!
//! Two formats are understood:
//!
//! - **JSON**: a top-level object whose values are all strings.
//! - **Dotenv**: `KEY=VALUE` lines, `#` comments and blank lines ignored.
//!
//! With [`FileFormat::Auto`] the JSON decode is tried first and the line
//! parser is the fallback. [`load_file`] is fail-open: a missing file is
//! silently empty, and any other read or parse failure is logged at `warn`
//! and also yields an empty mapping. A malformed local file must not keep an
//! application from starting when the process environment alone may suffice.

use std::path::Path;

use crate::error::EnvfigError;
use crate::types::{FileFormat, RawMapping};

/// Read and parse `path`, degrading to an empty mapping on any failure.
pub fn load_file(path: &Path, format: FileFormat) -> RawMapping {
    let content = match read_file(path) {
        Ok(Some(content)) => content,
        Ok(None) => {
            tracing::debug!(path = %path.display(), "environment file not found, skipping");
            return RawMapping::new();
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                format = format.label(),
                error = %e,
                "failed to read environment file, ignoring it"
            );
            return RawMapping::new();
        }
    };

    match parse_str(&content, format) {
        Ok(mapping) => {
            tracing::debug!(path = %path.display(), keys = mapping.len(), "loaded environment file");
            mapping
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                format = format.label(),
                error = %e,
                "failed to parse environment file, ignoring it"
            );
            RawMapping::new()
        }
    }
}

/// Read a file to a string. `Ok(None)` when it does not exist.
fn read_file(path: &Path) -> Result<Option<String>, EnvfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EnvfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parse file content according to `format`.
///
/// A leading UTF-8 byte order mark is ignored.
pub fn parse_str(content: &str, format: FileFormat) -> Result<RawMapping, EnvfigError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    match format {
        FileFormat::Auto => match parse_json(content) {
            Ok(mapping) => Ok(mapping),
            Err(_) => parse_dotenv(content),
        },
        FileFormat::Json => parse_json(content)
            .map_err(|e| EnvfigError::InvalidEnvironment(format!("not a JSON object of strings: {e}"))),
        FileFormat::Dotenv => parse_dotenv(content),
    }
}

/// Decode a JSON object of string values. Non-string values are a failure.
pub fn parse_json(content: &str) -> Result<RawMapping, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse `KEY=VALUE` lines.
///
/// Each line is trimmed; blank lines and lines starting with `#` are skipped.
/// The key is everything before the first `=`, the value everything after.
/// Both sides go through [`unquote`]. A later duplicate key replaces an
/// earlier one.
pub fn parse_dotenv(content: &str) -> Result<RawMapping, EnvfigError> {
    let mut mapping = RawMapping::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
            return Err(EnvfigError::InvalidEnvironment(format!(
                "line {line_no}: expected KEY=VALUE"
            )));
        };

        let key = unquote(raw_key);
        if key.is_empty() {
            return Err(EnvfigError::InvalidEnvironment(format!(
                "line {line_no}: empty key"
            )));
        }

        mapping.insert(key.to_string(), unquote(raw_value).to_string());
    }

    Ok(mapping)
}

/// Trim whitespace, then strip one layer of matching `"` or `'` quotes.
///
/// The inner text is returned as-is: no escape processing, no further trimming.
pub fn unquote(raw: &str) -> &str {
    let s = raw.trim();
    if s.len() >= 2 {
        for quote in ['"', '\''] {
            if s.starts_with(quote) && s.ends_with(quote) {
                return &s[1..s.len() - 1];
            }
        }
    }
    s
}
