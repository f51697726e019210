//! Ripple Core - Observable State Engine
//!
//! This crate provides a small reactive state store: a single authoritative
//! snapshot per store, a replay-latest broadcast of whole snapshots, and
//! per-field derivations generated from the declared state shape.
//!
//! # Architecture
//!
//! - [`StateContainer`]: owns the current snapshot and the subscriber
//!   registry; every state change flows through it.
//! - [`Selector`]: a deduplicated observable stream scoped to one field.
//! - [`Setter`]: a copy-on-write update function scoped to one field.
//! - [`ObservableState`] / [`observable_state!`]: the declaration layer
//!   that generates one selector and one setter per field, always in
//!   lock-step.
//! - [`Store`]: the assembled unit, built once from an injected
//!   initial-state factory.
//!
//! # Delivery Contract
//!
//! Publishing is multicast with replay-latest-on-subscribe semantics.
//! Delivery is synchronous: every observer runs to completion, in
//! subscription order, before the publishing call returns. No snapshot is
//! coalesced or dropped on the raw stream; only selector subscriptions
//! suppress consecutive equal values, each at its own projection.

#![forbid(unsafe_code)]

/// Observable-state primitives: container, selectors, setters, store
pub mod reactive;

pub use reactive::{ObservableState, Selector, Setter, StateContainer, Store, SubscriptionId};
