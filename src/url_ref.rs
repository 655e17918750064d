//! URL references as returned by [`Environment::as_url`](crate::Environment::as_url).
//!
//! A configured URL is either absolute (`https://api.example.com/v1`,
//! `mailto:ops@example.com`) or a relative reference (`/api/v1`,
//! `example.com/path`, `../x`) meant to be joined onto a base later.
//! [`url::Url`] only models the first kind, so [`UrlRef`] keeps relative
//! references as their validated text.

use std::fmt;

use url::Url;

/// Base used only to check that a relative reference joins cleanly.
const VALIDATION_BASE: &str = "http://relative.invalid/";

/// An absolute URL or a relative URL reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlRef {
    Absolute(Url),
    /// Relative reference, stored as written.
    Relative(String),
}

impl UrlRef {
    /// Parse `raw` as a URL reference of any scheme.
    ///
    /// Empty or whitespace-only input, characters outside the URI character
    /// set, and malformed `%` escapes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) => Some(UrlRef::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                if !is_uri_reference_text(raw) {
                    return None;
                }
                Url::parse(VALIDATION_BASE).ok()?.join(raw).ok()?;
                Some(UrlRef::Relative(raw.to_string()))
            }
            Err(_) => None,
        }
    }

    pub fn as_absolute(&self) -> Option<&Url> {
        match self {
            UrlRef::Absolute(url) => Some(url),
            UrlRef::Relative(_) => None,
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, UrlRef::Relative(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            UrlRef::Absolute(url) => url.as_str(),
            UrlRef::Relative(text) => text,
        }
    }

    /// Resolve against `base`. Absolute URLs are returned unchanged.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match self {
            UrlRef::Absolute(url) => Ok(url.clone()),
            UrlRef::Relative(text) => base.join(text),
        }
    }
}

impl fmt::Display for UrlRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unreserved, reserved and `%XX` escapes only (RFC 3986 section 2).
fn is_uri_reference_text(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || b"-._~:/?#[]@!$&'()*+,;=".contains(&b) => i += 1,
            _ => return false,
        }
    }
    true
}
