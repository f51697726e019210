//! Shared application context and the context-carrying store wrapper.

use std::sync::Arc;

use ripple_core::{ObservableState, Store};

use crate::config::AppConfig;

/// Shared, read-only application context.
///
/// One instance is built at process start and handed to every store that
/// needs access to process-wide configuration.
#[derive(Clone, Debug)]
pub struct AppContext {
    config: AppConfig,
}

impl AppContext {
    /// Build a context around an explicit configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build a context from the process environment.
    pub fn from_env() -> Self {
        Self::new(AppConfig::from_env())
    }

    /// The application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// A store coupled with the shared application context.
///
/// Thin wrapper: the store surface is reachable through
/// [`store`](Self::store) unchanged, and [`context`](Self::context) is the
/// only addition. No behavior lives here.
pub struct AppStore<S: ObservableState> {
    store: Store<S>,
    context: Arc<AppContext>,
}

impl<S: ObservableState> AppStore<S> {
    /// Build a store seeded by `initial`, sharing `context`.
    pub fn new<F: FnOnce() -> S>(context: Arc<AppContext>, initial: F) -> Self {
        Self {
            store: Store::new(initial),
            context,
        }
    }

    /// The underlying observable store.
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// The shared application context.
    pub fn context(&self) -> &AppContext {
        &self.context
    }
}
