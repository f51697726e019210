//! Per-field derivations: Selector (deduplicated stream) and Setter
//! (copy-on-write update function).
//!
//! Both are deterministic projections of one [`StateContainer`]: a
//! selector narrows the broadcast to one field, a setter widens one field
//! value into a whole-snapshot publish. Neither holds state of its own
//! beyond the container handle and the field's projection/assignment.

use super::container::{StateContainer, SubscriptionId};

/// A derived, read-only stream for one field of the state.
///
/// Subscribing attaches to the underlying container broadcast, projects
/// the field out of every snapshot, and suppresses consecutive values
/// that compare equal. The current value is replayed on subscribe, so the
/// callback always fires once immediately.
///
/// Dedup memory is per subscription: two subscribers to the same selector
/// each track their own previous value, and no selector shares memory
/// with another field's selector.
pub struct Selector<S, T> {
    container: StateContainer<S>,
    name: &'static str,
    project: fn(&S) -> T,
}

impl<S, T> Selector<S, T>
where
    S: Clone + Send + 'static,
    T: Clone + PartialEq + Send + 'static,
{
    /// Bind a selector to `container` for the field called `name`.
    ///
    /// Normally invoked from [`observable_state!`](crate::observable_state)
    /// expansion, not by hand.
    pub fn new(container: &StateContainer<S>, name: &'static str, project: fn(&S) -> T) -> Self {
        Self {
            container: container.clone(),
            name,
            project,
        }
    }

    /// The declared field name this selector projects.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value of the field, without subscribing.
    pub fn get(&self) -> T {
        (self.project)(&self.container.snapshot())
    }

    /// Observe the field.
    ///
    /// `emit` fires immediately with the current value, then once per
    /// published snapshot whose projection differs from the previously
    /// emitted value. Updates that only touch other fields are filtered
    /// out here, at this subscription's own projection.
    pub fn subscribe<F>(&self, mut emit: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let project = self.project;
        let mut last: Option<T> = None;
        self.container.subscribe(move |snapshot: &S| {
            let value = project(snapshot);
            if last.as_ref() != Some(&value) {
                emit(&value);
                last = Some(value);
            }
        })
    }

    /// Detach a subscription previously returned by
    /// [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.container.unsubscribe(id)
    }
}

/// A bound update function for one field of the state.
///
/// Calling [`set`](Self::set) performs exactly one copy-on-write update:
/// the current snapshot is cloned, the field replaced, and the result
/// published in full. The publish is unconditional; setting a field to a
/// value equal to its current one still broadcasts, and only selector
/// subscriptions suppress the non-change.
pub struct Setter<S, T> {
    container: StateContainer<S>,
    name: &'static str,
    assign: fn(&mut S, T),
}

impl<S, T> Setter<S, T>
where
    S: Clone + Send + 'static,
{
    /// Bind a setter to `container` for the field called `name`.
    ///
    /// Normally invoked from [`observable_state!`](crate::observable_state)
    /// expansion, not by hand.
    pub fn new(container: &StateContainer<S>, name: &'static str, assign: fn(&mut S, T)) -> Self {
        Self {
            container: container.clone(),
            name,
            assign,
        }
    }

    /// The declared field name this setter writes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace the field's value and publish the resulting snapshot.
    pub fn set(&self, value: T) {
        self.container.apply_field(self.name, self.assign, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug, PartialEq)]
    struct TwoFields {
        left: u32,
        right: String,
    }

    fn container() -> StateContainer<TwoFields> {
        StateContainer::new(|| TwoFields {
            left: 1,
            right: "a".to_string(),
        })
    }

    fn left_selector(container: &StateContainer<TwoFields>) -> Selector<TwoFields, u32> {
        Selector::new(container, "left", |s| s.left)
    }

    #[test]
    fn get_projects_current_snapshot() {
        let container = container();
        let selector = left_selector(&container);
        assert_eq!(selector.get(), 1);

        container.update(TwoFields {
            left: 5,
            right: "a".to_string(),
        });
        assert_eq!(selector.get(), 5);
    }

    #[test]
    fn subscribe_replays_then_dedups() {
        let container = container();
        let selector = left_selector(&container);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        selector.subscribe(move |v: &u32| sink.lock().expect("sink").push(*v));

        // Same projected value: publish happens, emission does not.
        container.update(TwoFields {
            left: 1,
            right: "b".to_string(),
        });
        // Genuine change: exactly one emission.
        container.update(TwoFields {
            left: 2,
            right: "b".to_string(),
        });

        assert_eq!(*seen.lock().expect("seen"), vec![1, 2]);
    }

    #[test]
    fn each_subscription_has_its_own_memory() {
        let container = container();
        let selector = left_selector(&container);

        let early = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&early);
        selector.subscribe(move |v: &u32| sink.lock().expect("sink").push(*v));

        container.update(TwoFields {
            left: 2,
            right: "a".to_string(),
        });

        // A late subscriber replays the current value even though the
        // early one already consumed the change.
        let late = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&late);
        selector.subscribe(move |v: &u32| sink.lock().expect("sink").push(*v));

        assert_eq!(*early.lock().expect("early"), vec![1, 2]);
        assert_eq!(*late.lock().expect("late"), vec![2]);
    }

    #[test]
    fn setter_publishes_even_without_change() {
        let container = container();
        let setter: Setter<TwoFields, u32> = Setter::new(&container, "left", |s, v| s.left = v);

        let raw = Arc::new(Mutex::new(0usize));
        let count = Arc::clone(&raw);
        container.subscribe(move |_: &TwoFields| *count.lock().expect("count") += 1);

        setter.set(1); // same value as current
        setter.set(1);

        // Replay + two unconditional publishes.
        assert_eq!(*raw.lock().expect("raw"), 3);
    }

    #[test]
    fn setter_performs_copy_on_write() {
        let container = container();
        let setter: Setter<TwoFields, String> =
            Setter::new(&container, "right", |s, v| s.right = v);

        setter.set("z".to_string());

        let after = container.snapshot();
        assert_eq!(after.left, 1);
        assert_eq!(after.right, "z");
    }
}
