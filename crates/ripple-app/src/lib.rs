//! Ripple App - composition layer over the observable-state engine.
//!
//! This crate is glue, not engine: it couples a [`ripple_core::Store`]
//! with a shared, read-only application context so concrete stores can
//! reach process-wide configuration. It adds no behavior to the core.
//!
//! - [`AppConfig`]: configuration value object, read from the environment
//!   once at construction.
//! - [`AppContext`]: shared read-only context handed to stores.
//! - [`AppStore`]: a store plus its context.

#![forbid(unsafe_code)]

mod app;
mod config;

pub use app::{AppContext, AppStore};
pub use config::{AppConfig, API_URL_ENV};
