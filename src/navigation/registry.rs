//! Top-level stack registry and the derived effective stack.
//!
//! The registry owns one [`BackStack`] per top-level destination (a tab) and a
//! pointer to the active one. Stacks only ever hold their own history; the view
//! presented to the user is derived on every change:
//!
//! ```text
//! active == default  →  default.entries
//! active != default  →  default.entries ++ active.entries
//!                       (active root skipped if it equals default's top)
//! ```
//!
//! The derived value is published through a `tokio::sync::watch` channel, so
//! subscribers always observe the latest state without polling or queueing.

use super::back_stack::BackStack;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use tokio::sync::watch;

/// Outcome of [`TopLevelRegistry::pop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome<K> {
    /// The top of the active stack was removed.
    Popped(K),
    /// The active tab was at its root; the default tab became active.
    ReturnedToDefault,
    /// Already on the default tab at its root; nothing changed.
    AtRoot,
}

/// Owns all back stacks and the active top-level key.
///
/// # Invariants
///
/// - The default key always has a stack.
/// - Every key that was ever active has a stack, seeded with itself as root.
/// - The published effective stack equals [`Self::effective_stack`] after every
///   mutating call returns.
pub struct TopLevelRegistry<K> {
    default_key: K,
    active_key: K,
    /// Stacks in first-visit order; each stack's root is its top-level key.
    stacks: Vec<BackStack<K>>,
    effective: watch::Sender<Vec<K>>,
}

impl<K> TopLevelRegistry<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Creates a registry whose default (and initially active) tab is `default_key`.
    #[must_use]
    pub fn new(default_key: K) -> Self {
        let (effective, _) = watch::channel(vec![default_key.clone()]);
        Self {
            stacks: vec![BackStack::new(default_key.clone())],
            active_key: default_key.clone(),
            default_key,
            effective,
        }
    }

    /// Makes `key` the active tab, creating its stack on first visit.
    ///
    /// Existing stack contents are never altered.
    pub fn switch_top_level(&mut self, key: K) {
        if key == self.active_key {
            tracing::trace!(key = ?key, "top level already active");
            return;
        }

        if self.stack_index(&key).is_none() {
            tracing::debug!(key = ?key, "creating back stack for top level");
            self.stacks.push(BackStack::new(key.clone()));
        }

        tracing::debug!(from = ?self.active_key, to = ?key, "switching top level");
        self.active_key = key;
        self.publish();
    }

    /// Pushes `destination` onto the active stack.
    pub fn push(&mut self, destination: K) {
        self.active_stack_mut().push(destination);
        self.publish();
    }

    /// Pops within the active stack, or falls back to the default tab.
    pub fn pop(&mut self) -> PopOutcome<K> {
        if let Some(popped) = self.active_stack_mut().pop() {
            self.publish();
            return PopOutcome::Popped(popped);
        }

        if self.active_key == self.default_key {
            tracing::debug!("pop on default root ignored");
            return PopOutcome::AtRoot;
        }

        tracing::debug!(from = ?self.active_key, "returning to default top level");
        self.active_key = self.default_key.clone();
        self.publish();
        PopOutcome::ReturnedToDefault
    }

    /// Replaces the active stack's contents with the single key `root`.
    pub fn pop_to_root_and_navigate(&mut self, root: K) {
        tracing::debug!(active = ?self.active_key, root = ?root, "pop to root and navigate");
        self.active_stack_mut().replace([root]);
        self.publish();
    }

    /// Cuts the stack of `key` back to its own root.
    ///
    /// Works on any tab, active or not. Unknown keys are ignored.
    pub fn reset_to_root(&mut self, key: &K) {
        let Some(index) = self.stack_index(key) else {
            tracing::debug!(key = ?key, "no stack to reset");
            return;
        };
        if self.stacks[index].is_at_root() {
            return;
        }

        tracing::debug!(key = ?key, depth = self.stacks[index].len(), "resetting stack to root");
        self.stacks[index].replace([]);
        self.publish();
    }

    /// Computes the stack presented to the user.
    ///
    /// The active root is skipped only when it repeats the default stack's
    /// top; a plain `default ++ active[1..]` would hide the root of every
    /// other tab opened from the default root.
    #[must_use]
    pub fn effective_stack(&self) -> Vec<K> {
        let default = self.stack_or_root(&self.default_key);
        if self.active_key == self.default_key {
            return default.to_vec();
        }

        let active = self.stack_or_root(&self.active_key);
        let skip = usize::from(default.last() == active.first());
        default
            .iter()
            .chain(active.iter().skip(skip))
            .cloned()
            .collect()
    }

    /// Subscribes to the effective stack.
    ///
    /// The watcher starts at the current value and reports each later change.
    #[must_use]
    pub fn subscribe(&self) -> StackWatcher<K> {
        StackWatcher {
            receiver: self.effective.subscribe(),
        }
    }

    /// Key of the active tab.
    #[must_use]
    pub const fn active_key(&self) -> &K {
        &self.active_key
    }

    /// Key of the default tab.
    #[must_use]
    pub const fn default_key(&self) -> &K {
        &self.default_key
    }

    /// Back stack owned by `key`, if that tab was ever visited.
    #[must_use]
    pub fn stack(&self, key: &K) -> Option<&BackStack<K>> {
        self.stack_index(key).map(|index| &self.stacks[index])
    }

    /// Destination currently on screen: the top of the effective stack.
    #[must_use]
    pub fn current(&self) -> K {
        self.stack_or_root(&self.active_key)
            .last()
            .cloned()
            .unwrap_or_else(|| self.active_key.clone())
    }

    /// Captures every stack for debug dumps.
    #[must_use]
    pub fn snapshot(&self) -> NavigationSnapshot<K> {
        NavigationSnapshot {
            default_key: self.default_key.clone(),
            active_key: self.active_key.clone(),
            stacks: self
                .stacks
                .iter()
                .map(|stack| (stack.root().clone(), stack.entries().to_vec()))
                .collect(),
            effective: self.effective_stack(),
        }
    }

    fn stack_index(&self, key: &K) -> Option<usize> {
        self.stacks.iter().position(|stack| stack.root() == key)
    }

    fn stack_or_root<'a>(&'a self, key: &'a K) -> &'a [K] {
        self.stack(key)
            .map_or(std::slice::from_ref(key), BackStack::entries)
    }

    fn active_stack_mut(&mut self) -> &mut BackStack<K> {
        if let Some(index) = self.stack_index(&self.active_key) {
            return &mut self.stacks[index];
        }
        // Unreachable through the public API: activation always creates the stack.
        tracing::warn!(key = ?self.active_key, "active top level had no stack, recreating");
        self.stacks.push(BackStack::new(self.active_key.clone()));
        let last = self.stacks.len() - 1;
        &mut self.stacks[last]
    }

    fn publish(&self) {
        let next = self.effective_stack();
        let changed = self.effective.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        tracing::trace!(changed, "effective stack published");
    }
}

impl<K: Debug> Debug for TopLevelRegistry<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopLevelRegistry")
            .field("default_key", &self.default_key)
            .field("active_key", &self.active_key)
            .field("stacks", &self.stacks)
            .finish_non_exhaustive()
    }
}

/// Receiving end of the effective-stack publication.
#[derive(Debug)]
pub struct StackWatcher<K> {
    receiver: watch::Receiver<Vec<K>>,
}

impl<K: Clone> StackWatcher<K> {
    /// Latest published effective stack.
    #[must_use]
    pub fn current(&self) -> Vec<K> {
        self.receiver.borrow().clone()
    }

    /// Returns the new effective stack if it changed since the last call.
    pub fn changed(&mut self) -> Option<Vec<K>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            Ok(false) | Err(_) => None,
        }
    }
}

/// Serializable view of the registry used by the navigation debug dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationSnapshot<K> {
    pub default_key: K,
    pub active_key: K,
    pub stacks: Vec<(K, Vec<K>)>,
    pub effective: Vec<K>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        Home,
        Tab2,
        Tab3,
        Detail(u8),
    }

    #[test]
    fn starts_on_default_stack() {
        let registry = TopLevelRegistry::new(Key::Home);
        assert_eq!(registry.active_key(), &Key::Home);
        assert_eq!(registry.effective_stack(), vec![Key::Home]);
        assert_eq!(registry.current(), Key::Home);
    }

    #[test]
    fn tab_round_trip_scenario() {
        let mut registry = TopLevelRegistry::new(Key::Home);

        registry.switch_top_level(Key::Tab2);
        assert_eq!(registry.stack(&Key::Tab2).map(BackStack::entries), Some(&[Key::Tab2][..]));
        assert_eq!(registry.effective_stack(), vec![Key::Home, Key::Tab2]);

        registry.push(Key::Detail(1));
        assert_eq!(registry.effective_stack(), vec![Key::Home, Key::Tab2, Key::Detail(1)]);

        assert_eq!(registry.pop(), PopOutcome::Popped(Key::Detail(1)));
        assert_eq!(registry.effective_stack(), vec![Key::Home, Key::Tab2]);

        assert_eq!(registry.pop(), PopOutcome::ReturnedToDefault);
        assert_eq!(registry.active_key(), &Key::Home);
        assert_eq!(registry.effective_stack(), vec![Key::Home]);

        assert_eq!(registry.pop(), PopOutcome::AtRoot);
        assert_eq!(registry.effective_stack(), vec![Key::Home]);
    }

    #[test]
    fn switching_back_preserves_tab_history() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        registry.switch_top_level(Key::Tab2);
        registry.push(Key::Detail(7));
        registry.switch_top_level(Key::Home);
        registry.push(Key::Detail(1));
        registry.push(Key::Detail(2));

        registry.switch_top_level(Key::Tab2);
        assert_eq!(
            registry.stack(&Key::Tab2).map(BackStack::entries),
            Some(&[Key::Tab2, Key::Detail(7)][..])
        );
        assert_eq!(
            registry.effective_stack(),
            vec![Key::Home, Key::Detail(1), Key::Detail(2), Key::Tab2, Key::Detail(7)]
        );
    }

    #[test]
    fn switching_to_active_key_is_a_no_op() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        registry.push(Key::Detail(3));
        let mut watcher = registry.subscribe();
        registry.switch_top_level(Key::Home);
        assert_eq!(watcher.changed(), None);
        assert_eq!(registry.effective_stack(), vec![Key::Home, Key::Detail(3)]);
    }

    #[test]
    fn reset_to_root_keeps_each_tab_rooted_at_itself() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        registry.switch_top_level(Key::Tab2);
        registry.push(Key::Detail(4));
        registry.switch_top_level(Key::Home);
        registry.push(Key::Detail(1));

        registry.reset_to_root(&Key::Tab2);
        assert_eq!(registry.stack(&Key::Tab2).map(BackStack::entries), Some(&[Key::Tab2][..]));
        assert_eq!(registry.effective_stack(), vec![Key::Home, Key::Detail(1)]);

        registry.reset_to_root(&Key::Detail(7));
        registry.switch_top_level(Key::Tab2);
        assert_eq!(registry.effective_stack(), vec![Key::Home, Key::Detail(1), Key::Tab2]);
    }

    #[test]
    fn pop_to_root_and_navigate_replaces_active_stack_only() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        registry.push(Key::Detail(1));
        registry.switch_top_level(Key::Tab2);
        registry.push(Key::Detail(2));
        registry.push(Key::Detail(3));

        registry.pop_to_root_and_navigate(Key::Tab2);
        assert_eq!(registry.stack(&Key::Tab2).map(BackStack::len), Some(1));
        assert_eq!(
            registry.stack(&Key::Home).map(BackStack::entries),
            Some(&[Key::Home, Key::Detail(1)][..])
        );
    }

    #[test]
    fn active_root_is_not_presented_twice() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        registry.pop_to_root_and_navigate(Key::Tab2);
        registry.switch_top_level(Key::Tab2);
        registry.push(Key::Detail(9));
        assert_eq!(registry.effective_stack(), vec![Key::Tab2, Key::Detail(9)]);
    }

    #[test]
    fn watcher_observes_every_structural_change() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        let mut watcher = registry.subscribe();
        assert_eq!(watcher.current(), vec![Key::Home]);
        assert_eq!(watcher.changed(), None);

        registry.push(Key::Detail(1));
        assert_eq!(watcher.changed(), Some(vec![Key::Home, Key::Detail(1)]));
        assert_eq!(watcher.changed(), None);

        registry.switch_top_level(Key::Tab3);
        registry.push(Key::Detail(2));
        // Only the latest value is retained.
        assert_eq!(
            watcher.changed(),
            Some(vec![Key::Home, Key::Detail(1), Key::Tab3, Key::Detail(2)])
        );
    }

    #[test]
    fn snapshot_lists_stacks_in_visit_order() {
        let mut registry = TopLevelRegistry::new(Key::Home);
        registry.switch_top_level(Key::Tab3);
        registry.switch_top_level(Key::Tab2);
        let snapshot = registry.snapshot();
        let roots: Vec<Key> = snapshot.stacks.iter().map(|(root, _)| *root).collect();
        assert_eq!(roots, vec![Key::Home, Key::Tab3, Key::Tab2]);
        assert_eq!(snapshot.active_key, Key::Tab2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Switch(u8),
        Push(u8),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..3).prop_map(Op::Switch),
            any::<u8>().prop_map(Op::Push),
            Just(Op::Pop),
        ]
    }

    fn tab(index: u8) -> Key {
        match index {
            0 => Key::Home,
            1 => Key::Tab2,
            _ => Key::Tab3,
        }
    }

    proptest! {
        #[test]
        fn effective_stack_follows_formula(ops in proptest::collection::vec(op(), 0..48)) {
            let mut registry = TopLevelRegistry::new(Key::Home);
            let watcher = registry.subscribe();

            for op in ops {
                match op {
                    Op::Switch(index) => registry.switch_top_level(tab(index)),
                    Op::Push(n) => registry.push(Key::Detail(n)),
                    Op::Pop => { registry.pop(); }
                }

                let default = registry.stack(&Key::Home).map(|s| s.entries().to_vec()).unwrap_or_default();
                let active = registry.stack(registry.active_key()).map(|s| s.entries().to_vec()).unwrap_or_default();
                prop_assert!(!active.is_empty());

                let expected = if registry.active_key() == &Key::Home {
                    default
                } else {
                    default.into_iter().chain(active).collect()
                };
                prop_assert_eq!(registry.effective_stack(), expected.clone());
                prop_assert_eq!(watcher.current(), expected);
            }
        }
    }
}
