//! Layered environment configuration for Rust applications. Point at your
//! `.env` files, name the keys you need, and go.
//!
//! Envfig merges flat string settings from built-in defaults, env files, and
//! the live process environment, checks that a set of required keys is
//! present, and hands you an [`Environment`] with typed accessors.
//!
//! ```ignore
//! let env = Envfig::builder()
//!     .source(EnvSource::base_with_override(".", Some("development")))
//!     .required_keys(["DATABASE_URL"])
//!     .load()?;
//!
//! let port = env.as_int("PORT").unwrap_or(8080);
//! let db = env.as_url("DATABASE_URL");
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Defaults              .defaults() / .default_value()
//!        ↑ overridden by
//! Env files             .env, then .env.<name>
//!        ↑ overridden by
//! Process environment   std::env, read once per load
//! ```
//!
//! Every layer is **sparse** and merging is last-writer-wins per key. Values
//! are always strings; there is no nesting.
//!
//! # Sources
//!
//! An [`EnvSource`] chooses the file layer:
//!
//! - **`NoFiles`**: skip disk entirely.
//! - **`SingleFile(path)`**: one explicit file.
//! - **`BaseWithOverride { root, overlay }`**: `{root}/.env`, then
//!   `{root}/.env.{overlay}` on top when an overlay name is given.
//!
//! [`rooted()`](EnvfigBuilder::rooted) does the same with a symbolic
//! [`SearchRoot`] (cwd, home subdirectory, platform config dir) resolved at
//! load time.
//!
//! # File formats
//!
//! Each file is first tried as a JSON object of strings, then as `KEY=VALUE`
//! lines (`#` comments, blank lines ignored, one layer of `"`/`'` quotes
//! stripped from keys and values). [`format()`](EnvfigBuilder::format) can pin
//! one format.
//!
//! File loading is **fail-open**. A missing file contributes nothing, silently.
//! An unreadable or malformed file also contributes nothing and a `warn` event
//! is emitted through [`tracing`]. Only the required-key check can fail a load.
//!
//! # Typed access
//!
//! [`Environment`] stores strings and converts on read:
//! [`as_int`](Environment::as_int), [`as_bool`](Environment::as_bool)
//! (`true/yes/1`, `false/no/0`, any case), and [`as_url`](Environment::as_url)
//! (a [`UrlRef`]: absolute URL or relative reference).
//! Application-specific views are best written as small structs over these:
//!
//! ```ignore
//! struct ServerSettings<'a>(&'a Environment);
//!
//! impl ServerSettings<'_> {
//!     fn port(&self) -> u16 {
//!         self.0.as_int("PORT").and_then(|p| u16::try_from(p).ok()).unwrap_or(8080)
//!     }
//! }
//! ```
//!
//! # Sharing
//!
//! [`Environment`] has no internal locking. For one process-wide instance use
//! [`SharedEnvironment`], which caches behind a mutex and supports explicit
//! [`reload()`](SharedEnvironment::reload).
//!
//! # Error handling
//!
//! All fallible operations return [`EnvfigError`]. A failed
//! [`load()`](EnvfigBuilder::load) is logged at `error` and returned as
//! [`EnvfigError::InitializationFailed`] wrapping the cause, usually
//! [`EnvfigError::MissingRequiredKeys`].

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod environment;
mod file;
pub(crate) mod merge;
mod parse;
mod resolve;
mod shared;
mod url_ref;

#[cfg(test)]
mod fixtures;

pub use builder::{Envfig, EnvfigBuilder};
#[cfg(feature = "clap")]
pub use cli::EnvArgs;
pub use environment::Environment;
pub use error::EnvfigError;
pub use file::load_source;
pub use parse::{load_file, parse_str};
pub use shared::SharedEnvironment;
pub use types::{EnvSource, FileFormat, RawMapping, SearchRoot};
pub use url_ref::UrlRef;
