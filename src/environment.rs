//! The configuration container: a flat string store with typed accessors.
//!
//! An [`Environment`] owns its [`RawMapping`] and the set of keys that had to
//! be present when it was built. Typed views (`as_int`, `as_bool`, `as_url`)
//! are computed on every call from the stored strings; nothing is cached, so a
//! [`set`](Environment::set) is visible immediately.
//!
//! Required keys are checked once, at construction. A later `set(key, None)`
//! on a required key is allowed and not re-validated.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use crate::error::EnvfigError;
use crate::types::RawMapping;
use crate::url_ref::UrlRef;

/// Merged configuration values plus the required-key set they were checked against.
///
/// Serializes as a flat JSON-style object of strings. Deserializing never
/// re-validates: the decoded container has no required keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    values: RawMapping,
    #[serde(skip)]
    required_keys: BTreeSet<String>,
}

impl Environment {
    /// Build from an explicit mapping, failing if any required key is absent.
    ///
    /// The error lists exactly the missing keys, sorted.
    pub fn new<I, K>(values: RawMapping, required_keys: I) -> Result<Self, EnvfigError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let required_keys: BTreeSet<String> = required_keys.into_iter().map(Into::into).collect();
        let missing: Vec<String> = required_keys
            .iter()
            .filter(|key| !values.contains_key(key.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(EnvfigError::MissingRequiredKeys(missing));
        }
        Ok(Self {
            values,
            required_keys,
        })
    }

    /// Build from pairs with no required keys. Handy for substituting a test
    /// environment into components that take an `Environment`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            required_keys: BTreeSet::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Insert or replace `key`; `None` removes it. Required keys are not re-checked.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match value {
            Some(v) => {
                self.values.insert(key, v);
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    /// Remove `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// The value as a base-10 integer. `None` if missing or not an integer literal.
    pub fn as_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.parse().ok()
    }

    /// The value as a boolean.
    ///
    /// `true`/`yes`/`1` and `false`/`no`/`0`, case-insensitive. Anything else is `None`.
    pub fn as_bool(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        if ["true", "yes", "1"].iter().any(|t| raw.eq_ignore_ascii_case(t)) {
            Some(true)
        } else if ["false", "no", "0"].iter().any(|f| raw.eq_ignore_ascii_case(f)) {
            Some(false)
        } else {
            None
        }
    }

    /// The value as a URL reference of any scheme, absolute or relative.
    ///
    /// `None` if missing, empty, or not a syntactically valid reference.
    pub fn as_url(&self, key: &str) -> Option<UrlRef> {
        UrlRef::parse(self.get(key)?)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Keys that were required at construction time.
    pub fn required_keys(&self) -> &BTreeSet<String> {
        &self.required_keys
    }

    pub fn into_inner(self) -> RawMapping {
        self.values
    }
}
