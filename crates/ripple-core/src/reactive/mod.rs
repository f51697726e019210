//! # Observable State Primitives
//!
//! The engine behind every ripple store. State lives in a
//! [`StateContainer`] as one immutable snapshot; all mutation is
//! whole-value replacement, and every replacement is broadcast to
//! subscribers before the updating call returns.
//!
//! ## Core Types
//!
//! - [`StateContainer<S>`]: authoritative snapshot holder and broadcast
//!   point. Replays the current snapshot to each new subscriber.
//!
//! - [`Selector<S, T>`]: a derived stream for one field. Projects the
//!   field out of every snapshot and suppresses consecutive values that
//!   compare equal, with per-subscription memory.
//!
//! - [`Setter<S, T>`]: a bound update function for one field. Clones the
//!   current snapshot, replaces the field, and publishes the result.
//!
//! - [`Store<S>`]: container plus the selector and setter collections
//!   generated from the state declaration.
//!
//! ## Design Principles
//!
//! 1. **Runtime-agnostic**: std primitives only (Arc, RwLock, Mutex,
//!    AtomicU64). No async runtime, no background tasks, no channels.
//!
//! 2. **Synchronous delivery**: observers run inside the publishing call,
//!    in subscription order. A sequence of updates from one caller is
//!    observed in exactly that order, with nothing coalesced.
//!
//! 3. **Equality-bounded dedup**: change suppression relies on each field
//!    type's `PartialEq`, derived structurally for nested values. Cyclic
//!    value graphs are unrepresentable, so comparison always terminates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ripple_core::{observable_state, Store};
//!
//! observable_state! {
//!     pub struct CounterState {
//!         pub count: u64,
//!         pub label: String,
//!     }
//!     selectors: pub struct CounterSelectors;
//!     setters: pub struct CounterSetters;
//! }
//!
//! let store = Store::new(|| CounterState { count: 0, label: "idle".into() });
//!
//! let sub = store.selectors().count.subscribe(|count| {
//!     println!("count is now {count}");
//! });
//!
//! store.setters().count.set(1); // emits on the count selector
//! store.setters().count.set(1); // publishes, but the selector stays quiet
//! store.unsubscribe(sub);
//! ```

mod container;
mod field;
mod selector;
mod store;

pub use container::{StateContainer, SubscriptionId};
pub use field::ObservableState;
pub use selector::{Selector, Setter};
pub use store::Store;
