//! A process-wide holder for one lazily loaded [`Environment`].
//!
//! [`Environment`] itself has no synchronization: each instance belongs to
//! whoever holds it. Applications that want a single instance shared across
//! threads keep a `SharedEnvironment` (typically in a `static` or an `Arc`)
//! and go through its lock for every read and write.
//!
//! ```ignore
//! static ENV: LazyLock<SharedEnvironment> = LazyLock::new(|| {
//!     SharedEnvironment::from_builder(
//!         Envfig::builder().source(EnvSource::base_with_override(".", Some("production"))),
//!     )
//! });
//!
//! let port = ENV.get_or_init()?.as_int("PORT");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use crate::builder::EnvfigBuilder;
use crate::environment::Environment;
use crate::error::EnvfigError;

type Loader = Box<dyn Fn() -> Result<Environment, EnvfigError> + Send + Sync>;

/// Lock-guarded cache of one [`Environment`] with explicit reload.
pub struct SharedEnvironment {
    loader: Loader,
    cached: Mutex<Option<Arc<Environment>>>,
}

impl SharedEnvironment {
    /// Create an empty holder that calls `loader` on first use and on reload.
    ///
    /// `loader` runs with the holder's lock held and must not call back into
    /// the same `SharedEnvironment`; doing so deadlocks.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Environment, EnvfigError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            cached: Mutex::new(None),
        }
    }

    /// Create a holder that re-runs a copy of `builder` on every load.
    pub fn from_builder(builder: EnvfigBuilder) -> Self {
        Self::new(move || builder.clone().load())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Environment>>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached environment, loading it first if needed.
    ///
    /// The lock is held while loading, so concurrent first callers load once.
    pub fn get_or_init(&self) -> Result<Arc<Environment>, EnvfigError> {
        let mut cached = self.lock();
        if let Some(env) = cached.as_ref() {
            return Ok(Arc::clone(env));
        }
        let env = Arc::new((self.loader)()?);
        *cached = Some(Arc::clone(&env));
        Ok(env)
    }

    /// Load again and replace the cache.
    ///
    /// On failure the previously cached environment (if any) is kept.
    /// Handles returned earlier keep seeing the old snapshot.
    pub fn reload(&self) -> Result<Arc<Environment>, EnvfigError> {
        let mut cached = self.lock();
        let env = Arc::new((self.loader)()?);
        *cached = Some(Arc::clone(&env));
        tracing::debug!(keys = env.len(), "reloaded shared environment");
        Ok(env)
    }

    /// The cached environment, without loading.
    pub fn get(&self) -> Option<Arc<Environment>> {
        self.lock().clone()
    }

    /// Mutate the cached environment in place, loading it first if needed.
    ///
    /// Outstanding handles from [`get_or_init`](Self::get_or_init) are not
    /// affected; the cache gets its own copy if one is still shared.
    ///
    /// `f` runs with the lock held and must not call any method of the same
    /// holder. Formatting it with `{:?}` is fine and reports `<locked>`.
    pub fn update<F>(&self, f: F) -> Result<(), EnvfigError>
    where
        F: FnOnce(&mut Environment),
    {
        let mut cached = self.lock();
        if cached.is_none() {
            *cached = Some(Arc::new((self.loader)()?));
        }
        if let Some(env) = cached.as_mut() {
            f(Arc::make_mut(env));
        }
        Ok(())
    }

    /// Drop the cache; the next [`get_or_init`](Self::get_or_init) loads again.
    pub fn clear(&self) {
        *self.lock() = None;
    }
}

impl fmt::Debug for SharedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("SharedEnvironment");
        match self.cached.try_lock() {
            Ok(cached) => out.field("loaded", &cached.is_some()),
            Err(TryLockError::Poisoned(poisoned)) => {
                out.field("loaded", &poisoned.into_inner().is_some())
            }
            Err(TryLockError::WouldBlock) => out.field("loaded", &format_args!("<locked>")),
        };
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Envfig;
    use crate::fixtures::test::write_file;
    use crate::types::EnvSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn counting(counter: Arc<AtomicUsize>) -> SharedEnvironment {
        SharedEnvironment::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Environment::from_pairs([("LOADS", n.to_string())]))
        })
    }

    #[test]
    fn get_or_init_loads_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let shared = counting(Arc::clone(&counter));
        assert!(shared.get().is_none());

        let first = shared.get_or_init().unwrap();
        let second = shared.get_or_init().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn reload_replaces_cache() {
        let counter = Arc::new(AtomicUsize::new(0));
        let shared = counting(Arc::clone(&counter));

        let before = shared.get_or_init().unwrap();
        let after = shared.reload().unwrap();
        assert_eq!(before.as_int("LOADS"), Some(1));
        assert_eq!(after.as_int("LOADS"), Some(2));
        assert_eq!(shared.get().unwrap().as_int("LOADS"), Some(2));
    }

    #[test]
    fn failed_reload_keeps_previous() {
        let counter = Arc::new(AtomicUsize::new(0));
        let loader_counter = Arc::clone(&counter);
        let shared = SharedEnvironment::new(move || {
            if loader_counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(Environment::from_pairs([("PORT", "1")]))
            } else {
                Err(EnvfigError::MissingRequiredKeys(vec!["PORT".into()]))
            }
        });

        shared.get_or_init().unwrap();
        assert!(shared.reload().is_err());
        assert_eq!(shared.get().unwrap().as_int("PORT"), Some(1));
    }

    #[test]
    fn failed_first_load_caches_nothing() {
        let shared =
            SharedEnvironment::new(|| Err(EnvfigError::MissingRequiredKeys(vec!["X".into()])));
        assert!(shared.get_or_init().is_err());
        assert!(shared.get().is_none());
    }

    #[test]
    fn update_mutates_cache_not_old_handles() {
        let shared = SharedEnvironment::new(|| Ok(Environment::from_pairs([("PORT", "1")])));
        let old = shared.get_or_init().unwrap();

        shared
            .update(|env| env.set("PORT", Some("2".into())))
            .unwrap();

        assert_eq!(old.as_int("PORT"), Some(1));
        assert_eq!(shared.get().unwrap().as_int("PORT"), Some(2));
    }

    #[test]
    fn update_loads_when_empty() {
        let shared = SharedEnvironment::new(|| Ok(Environment::default()));
        shared
            .update(|env| env.set("NEW", Some("v".into())))
            .unwrap();
        assert_eq!(shared.get().unwrap().get("NEW"), Some("v"));
    }

    #[test]
    fn debug_inside_update_does_not_deadlock() {
        let shared = SharedEnvironment::new(|| Ok(Environment::default()));
        let mut inside = String::new();
        shared
            .update(|_| inside = format!("{shared:?}"))
            .unwrap();
        assert_eq!(inside, "SharedEnvironment { loaded: <locked> }");
        assert_eq!(format!("{shared:?}"), "SharedEnvironment { loaded: true }");
    }

    #[test]
    fn clear_forces_reload() {
        let counter = Arc::new(AtomicUsize::new(0));
        let shared = counting(Arc::clone(&counter));
        shared.get_or_init().unwrap();
        shared.clear();
        assert!(shared.get().is_none());
        assert_eq!(shared.get_or_init().unwrap().as_int("LOADS"), Some(2));
    }

    #[test]
    fn from_builder_rereads_files_on_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "app.env", "PORT=1\n");
        let shared = SharedEnvironment::from_builder(
            Envfig::builder()
                .source(EnvSource::SingleFile(path.clone()))
                .no_env(),
        );

        assert_eq!(shared.get_or_init().unwrap().as_int("PORT"), Some(1));
        std::fs::write(&path, "PORT=2\n").unwrap();
        assert_eq!(shared.get_or_init().unwrap().as_int("PORT"), Some(1));
        assert_eq!(shared.reload().unwrap().as_int("PORT"), Some(2));
    }

    #[test]
    fn shared_across_threads() {
        let counter = Arc::new(AtomicUsize::new(0));
        let shared = Arc::new(counting(Arc::clone(&counter)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || shared.get_or_init().unwrap().as_int("LOADS"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(1));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
