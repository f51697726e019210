//! StateContainer - authoritative snapshot holder and broadcast point
//!
//! Every state change in a store flows through one `StateContainer`. The
//! container owns the current snapshot, keeps the seed value produced by
//! the initial-state factory, and delivers each published snapshot to all
//! registered observers before the publishing call returns.

// Lock poisoning from a panicking observer is unrecoverable here, so
// expect() is the appropriate handling pattern for read/write/lock.
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Handle to one full-state subscription.
///
/// Returned by [`StateContainer::subscribe`]; pass it back to
/// [`StateContainer::unsubscribe`] to stop delivery. The container never
/// tears down subscriptions on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<S> = Box<dyn FnMut(&S) + Send>;

/// Inner state shared by all handles to one container.
struct ContainerInner<S> {
    /// The current snapshot. Replaced wholesale on every update.
    snapshot: RwLock<S>,
    /// The seed captured from the initial-state factory. `reset` reuses
    /// this value; the factory is never invoked again.
    initial: S,
    /// Registered observers in subscription order.
    observers: Mutex<Vec<(SubscriptionId, Observer<S>)>>,
    /// Source for subscription ids.
    next_id: AtomicU64,
}

/// Single source of truth for one store's state.
///
/// `StateContainer<S>` provides:
/// - `update()`: replace the snapshot and broadcast it
/// - `snapshot()`: read the last-published value
/// - `reset()`: republish the captured initial seed
/// - `subscribe()` / `unsubscribe()`: observer registration with
///   replay-latest semantics
///
/// # Delivery
///
/// Broadcast is multicast and synchronous: every observer runs to
/// completion, in subscription order, inside `update`. There is no
/// buffering, batching, or coalescing; a sequence of updates issued by one
/// caller is observed in exactly that order.
///
/// Observers run while the registry is borrowed. An observer must not call
/// back into the same container.
///
/// # Sharing
///
/// Cloning a container clones the handle, not the state. All clones see
/// the same snapshot and the same observer registry.
pub struct StateContainer<S> {
    inner: Arc<ContainerInner<S>>,
}

impl<S> Clone for StateContainer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone + Send + 'static> StateContainer<S> {
    /// Create a container seeded by `initial`.
    ///
    /// The factory runs exactly once. Its value becomes both the current
    /// snapshot and the seed that [`reset`](Self::reset) restores; a
    /// factory with side effects will not see them repeated on reset.
    pub fn new<F: FnOnce() -> S>(initial: F) -> Self {
        let seed = initial();
        Self {
            inner: Arc::new(ContainerInner {
                snapshot: RwLock::new(seed.clone()),
                initial: seed,
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Read the last-published snapshot.
    pub fn snapshot(&self) -> S {
        self.inner
            .snapshot
            .read()
            .expect("snapshot lock poisoned")
            .clone()
    }

    /// Replace the current snapshot and broadcast it.
    ///
    /// No shape validation happens here; the type system already
    /// guarantees every field is present. Publishing is unconditional:
    /// an update equal to the current snapshot still reaches every raw
    /// observer. Deduplication belongs to the selector layer.
    pub fn update(&self, next: S) {
        {
            let mut current = self.inner.snapshot.write().expect("snapshot lock poisoned");
            *current = next.clone();
        }

        let mut observers = self
            .inner
            .observers
            .lock()
            .expect("observer registry poisoned");
        tracing::trace!(observers = observers.len(), "publishing snapshot");
        for (_, observer) in observers.iter_mut() {
            observer(&next);
        }
    }

    /// Republish the originally captured initial seed.
    ///
    /// Equivalent to `update(seed.clone())`. The initial-state factory is
    /// NOT re-invoked.
    pub fn reset(&self) {
        tracing::trace!("resetting to captured initial snapshot");
        self.update(self.inner.initial.clone());
    }

    /// Copy-on-write single-field update: clone the current snapshot,
    /// overwrite one field on the clone, publish the result.
    ///
    /// This is the path every [`Setter`](super::Setter) takes.
    pub(crate) fn apply_field<T>(&self, name: &'static str, assign: fn(&mut S, T), value: T) {
        tracing::trace!(field = name, "copy-on-write field update");
        let mut next = self.snapshot();
        assign(&mut next, value);
        self.update(next);
    }

    /// Register an observer of whole snapshots.
    ///
    /// The observer is invoked immediately with the current snapshot
    /// (replay-latest), then once per subsequent publish, until
    /// [`unsubscribe`](Self::unsubscribe) removes it.
    pub fn subscribe<F>(&self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&S) + Send + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        // Hold the registry while replaying so no publish can interleave
        // between the replayed snapshot and registration.
        let mut observers = self
            .inner
            .observers
            .lock()
            .expect("observer registry poisoned");
        let current = self
            .inner
            .snapshot
            .read()
            .expect("snapshot lock poisoned")
            .clone();
        observer(&current);
        observers.push((id, Box::new(observer)));
        tracing::trace!(subscription = id.0, "observer attached");
        id
    }

    /// Remove a previously registered observer.
    ///
    /// Returns `false` if the id was already removed (or never issued by
    /// this container).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .inner
            .observers
            .lock()
            .expect("observer registry poisoned");
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        let removed = observers.len() != before;
        if removed {
            tracing::trace!(subscription = id.0, "observer detached");
        }
        removed
    }

    /// Number of registered observers. Test and diagnostic aid.
    pub fn observer_count(&self) -> usize {
        self.inner
            .observers
            .lock()
            .expect("observer registry poisoned")
            .len()
    }
}

impl<S: Clone + Send + std::fmt::Debug + 'static> std::fmt::Debug for StateContainer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateContainer")
            .field("snapshot", &self.snapshot())
            .field("observers", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn new_captures_factory_value() {
        let container = StateContainer::new(|| 7u32);
        assert_eq!(container.snapshot(), 7);
    }

    #[test]
    fn factory_runs_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let container = StateContainer::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            0u32
        });

        container.update(5);
        container.reset();
        container.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn update_replaces_snapshot() {
        let container = StateContainer::new(|| 0u32);
        container.update(42);
        assert_eq!(container.snapshot(), 42);
    }

    #[test]
    fn subscribe_replays_current_snapshot() {
        let container = StateContainer::new(|| 0u32);
        container.update(10);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));

        assert_eq!(*seen.lock().expect("seen"), vec![10]);
    }

    #[test]
    fn delivery_is_synchronous_and_ordered() {
        let container = StateContainer::new(|| 0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));

        container.update(1);
        container.update(2);
        container.update(3);

        // Replay plus every publish, in order, nothing coalesced.
        assert_eq!(*seen.lock().expect("seen"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn all_observers_receive_every_publish() {
        let container = StateContainer::new(|| 0u32);
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&first);
        container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));
        let sink = Arc::clone(&second);
        container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));

        container.update(1);

        assert_eq!(*first.lock().expect("first"), vec![0, 1]);
        assert_eq!(*second.lock().expect("second"), vec![0, 1]);
    }

    #[test]
    fn reset_republishes_captured_seed() {
        let container = StateContainer::new(|| 0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));

        container.update(9);
        container.reset();

        assert_eq!(*seen.lock().expect("seen"), vec![0, 9, 0]);
        assert_eq!(container.snapshot(), 0);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let container = StateContainer::new(|| 0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));

        container.update(1);
        assert!(container.unsubscribe(id));
        container.update(2);

        assert_eq!(*seen.lock().expect("seen"), vec![0, 1]);
        assert_eq!(container.observer_count(), 0);
        // A second removal of the same id is a no-op.
        assert!(!container.unsubscribe(id));
    }

    #[test]
    fn clone_shares_snapshot_and_registry() {
        let container = StateContainer::new(|| 0u32);
        let other = container.clone();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        container.subscribe(move |s: &u32| sink.lock().expect("sink").push(*s));

        other.update(3);

        assert_eq!(container.snapshot(), 3);
        assert_eq!(*seen.lock().expect("seen"), vec![0, 3]);
    }
}
