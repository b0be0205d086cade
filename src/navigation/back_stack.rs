//! A single, never-empty navigation history.
//!
//! A [`BackStack`] is created with exactly one element, its root. The root is a
//! fixed identity of the stack: `pop` never removes it and `replace` with no
//! keys falls back to it.

use std::fmt::Debug;

/// Ordered, non-empty history of destination keys.
///
/// # Invariants
///
/// - `len() >= 1` at all times.
/// - `pop()` on a single-element stack leaves it unchanged.
///
/// # Example
///
/// ```rust
/// use contactbook::navigation::BackStack;
///
/// let mut stack = BackStack::new("home");
/// stack.push("detail");
/// assert_eq!(stack.pop(), Some("detail"));
/// assert_eq!(stack.pop(), None);
/// assert_eq!(stack.entries(), &["home"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStack<K> {
    /// Construction key, restored by an empty `replace`.
    root: K,
    entries: Vec<K>,
}

#[allow(clippy::len_without_is_empty)]
impl<K: Clone + Eq + Debug> BackStack<K> {
    /// Creates a stack containing only `root`.
    #[must_use]
    pub fn new(root: K) -> Self {
        Self {
            entries: vec![root.clone()],
            root,
        }
    }

    /// Appends `key` on top of the stack.
    pub fn push(&mut self, key: K) {
        tracing::trace!(key = ?key, depth = self.entries.len() + 1, "back stack push");
        self.entries.push(key);
    }

    /// Removes and returns the top key, unless the stack is at its root.
    pub fn pop(&mut self) -> Option<K> {
        if self.entries.len() > 1 {
            let popped = self.entries.pop();
            tracing::trace!(key = ?popped, depth = self.entries.len(), "back stack pop");
            popped
        } else {
            tracing::trace!(root = ?self.root, "pop at root ignored");
            None
        }
    }

    /// Replaces the whole history with `keys`.
    ///
    /// An empty `keys` resets the stack to its construction root.
    pub fn replace<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.entries.clear();
        self.entries.extend(keys);
        if self.entries.is_empty() {
            self.entries.push(self.root.clone());
        }
        tracing::trace!(depth = self.entries.len(), "back stack replaced");
    }

    /// Current history, bottom first.
    #[must_use]
    pub fn entries(&self) -> &[K] {
        &self.entries
    }

    /// Number of keys in the stack, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Topmost key.
    #[must_use]
    pub fn top(&self) -> &K {
        // Non-empty by construction; fall back to the root for completeness.
        self.entries.last().unwrap_or(&self.root)
    }

    /// The construction key of this stack.
    #[must_use]
    pub const fn root(&self) -> &K {
        &self.root
    }

    /// Whether only one key is left.
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        self.entries.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn new_stack_holds_only_its_root() {
        let stack = BackStack::new("home");
        assert_eq!(stack.entries(), &["home"]);
        assert_eq!(stack.len(), 1);
        assert!(stack.is_at_root());
        assert_eq!(stack.top(), &"home");
    }

    #[test]
    fn pop_at_root_is_a_no_op() {
        let mut stack = BackStack::new("home");
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.entries(), &["home"]);
    }

    #[test]
    fn pop_returns_the_last_pushed_key() {
        let mut stack = BackStack::new("home");
        stack.push("list");
        stack.push("detail");
        assert_eq!(stack.pop(), Some("detail"));
        assert_eq!(stack.top(), &"list");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn replace_sets_contents_verbatim() {
        let mut stack = BackStack::new("home");
        stack.push("a");
        stack.replace(["x", "y"]);
        assert_eq!(stack.entries(), &["x", "y"]);
        // The root identity survives a replace that drops it.
        assert_eq!(stack.root(), &"home");
    }

    #[test]
    fn empty_replace_resets_to_construction_root() {
        let mut stack = BackStack::new("home");
        stack.replace(["other"]);
        stack.replace(Vec::new());
        assert_eq!(stack.entries(), &["home"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![any::<u8>().prop_map(Op::Push), Just(Op::Pop)]
    }

    proptest! {
        #[test]
        fn push_pop_matches_array_model(ops in proptest::collection::vec(op(), 0..64)) {
            let mut stack = BackStack::new(0u8);
            let mut model = vec![0u8];

            for op in ops {
                match op {
                    Op::Push(key) => {
                        stack.push(key);
                        model.push(key);
                    }
                    Op::Pop => {
                        let popped = stack.pop();
                        let expected = if model.len() > 1 { model.pop() } else { None };
                        prop_assert_eq!(popped, expected);
                    }
                }
                prop_assert!(stack.len() >= 1);
                prop_assert_eq!(stack.entries(), model.as_slice());
            }
        }
    }
}
