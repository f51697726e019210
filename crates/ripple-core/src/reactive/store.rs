//! Store - the assembled observable-state unit.

use super::container::{StateContainer, SubscriptionId};
use super::field::ObservableState;

/// A state container bundled with its generated per-field collections.
///
/// Built once from an injected initial-state factory; the container,
/// selectors, and setters are created together and live as long as the
/// store. There is no teardown beyond dropping the store (individual
/// subscriptions are the subscriber's responsibility).
pub struct Store<S: ObservableState> {
    container: StateContainer<S>,
    selectors: S::Selectors,
    setters: S::Setters,
}

impl<S: ObservableState> Store<S> {
    /// Build a store seeded by `initial`.
    ///
    /// The factory runs exactly once; [`reset`](Self::reset) restores the
    /// captured value rather than re-invoking it.
    pub fn new<F: FnOnce() -> S>(initial: F) -> Self {
        let container = StateContainer::new(initial);
        let selectors = S::selectors(&container);
        let setters = S::setters(&container);
        Self {
            container,
            selectors,
            setters,
        }
    }

    /// The generated selector collection, one entry per declared field.
    pub fn selectors(&self) -> &S::Selectors {
        &self.selectors
    }

    /// The generated setter collection, one entry per declared field.
    pub fn setters(&self) -> &S::Setters {
        &self.setters
    }

    /// Read the last-published snapshot.
    pub fn snapshot(&self) -> S {
        self.container.snapshot()
    }

    /// Replace the whole state and broadcast it.
    pub fn update(&self, next: S) {
        self.container.update(next);
    }

    /// Republish the originally captured initial state.
    pub fn reset(&self) {
        self.container.reset();
    }

    /// Observe whole snapshots. Replays the current one immediately.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.container.subscribe(observer)
    }

    /// Detach a full-state or selector subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.container.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    crate::observable_state! {
        struct ToggleState {
            on: bool,
        }
        selectors: struct ToggleSelectors;
        setters: struct ToggleSetters;
    }

    #[test]
    fn store_wires_container_selectors_and_setters_together() {
        let store = Store::new(|| ToggleState { on: false });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store
            .selectors()
            .on
            .subscribe(move |v: &bool| sink.lock().expect("sink").push(*v));

        store.setters().on.set(true);
        store.setters().on.set(true); // publishes, selector dedups

        assert_eq!(*seen.lock().expect("seen"), vec![false, true]);
        assert!(store.snapshot().on);
    }

    #[test]
    fn reset_restores_initial_state() {
        let store = Store::new(|| ToggleState { on: false });
        store.setters().on.set(true);
        store.reset();
        assert!(!store.snapshot().on);
    }
}
