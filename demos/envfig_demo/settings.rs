//! Typed settings the demo reads from its [`Environment`].
//!
//! envfig itself knows no key names; each application layers its own view
//! over the flat string store like this.

use envfig::{Environment, UrlRef};

pub struct DemoSettings<'a> {
    env: &'a Environment,
}

impl<'a> DemoSettings<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    pub fn app_name(&self) -> &str {
        self.env.get("APP_NAME").unwrap_or("envfig-demo")
    }

    /// Listen port; out-of-range or non-numeric values fall back to 8080.
    pub fn port(&self) -> u16 {
        self.env
            .as_int("PORT")
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(8080)
    }

    pub fn debug(&self) -> bool {
        self.env.as_bool("DEBUG").unwrap_or(false)
    }

    pub fn database_url(&self) -> Option<UrlRef> {
        self.env.as_url("DATABASE_URL")
    }
}
