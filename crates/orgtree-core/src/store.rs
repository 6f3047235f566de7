//! [`TreeStore`] — the in-memory holder of the current chart.
//!
//! A minimal observable value: `get`, `set`, `subscribe`. Built on
//! [`tokio::sync::watch`], so any number of observers can await changes
//! without the store knowing anything about how the tree is presented.

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;

use crate::OrgNode;

pub struct TreeStore {
  tx:      watch::Sender<Arc<OrgNode>>,
  version: AtomicU64,
}

impl TreeStore {
  pub fn new(tree: OrgNode) -> Self {
    let (tx, _rx) = watch::channel(Arc::new(tree));
    Self { tx, version: AtomicU64::new(0) }
  }

  /// Snapshot of the current tree.
  pub fn get(&self) -> Arc<OrgNode> { self.tx.borrow().clone() }

  /// Replace the current tree. Observers are notified only when the new tree
  /// differs from the current one; the return value says whether it did.
  pub fn set(&self, tree: OrgNode) -> bool {
    self.update(move |_| tree)
  }

  /// Apply `f` (typically one of the [`crate::mutate`] functions) to the
  /// current tree and store the result. Runs under the store's write lock, so
  /// concurrent updates cannot interleave. `f` must not call back into this
  /// store (not even [`TreeStore::get`]); doing so deadlocks.
  pub fn update(&self, f: impl FnOnce(&OrgNode) -> OrgNode) -> bool {
    let changed = self.tx.send_if_modified(|current| {
      let next = f(current.as_ref());
      if next == **current {
        return false;
      }
      *current = Arc::new(next);
      true
    });
    if changed {
      self.version.fetch_add(1, Ordering::Relaxed);
    }
    changed
  }

  /// A receiver that observes every accepted change from now on. The value
  /// current at subscription time counts as already seen.
  pub fn subscribe(&self) -> watch::Receiver<Arc<OrgNode>> { self.tx.subscribe() }

  /// Number of accepted changes since the store was created.
  pub fn version(&self) -> u64 { self.version.load(Ordering::Relaxed) }
}

impl Default for TreeStore {
  fn default() -> Self { Self::new(OrgNode::default_root()) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mutate::{add_child, delete_node};

  #[tokio::test]
  async fn subscribers_see_changes() {
    let store = TreeStore::default();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().unwrap());

    assert!(store.update(|t| add_child(t, "root-1")));
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().children.len(), 1);
    assert_eq!(store.version(), 1);
  }

  #[tokio::test]
  async fn equal_values_do_not_notify() {
    let store = TreeStore::default();
    let rx = store.subscribe();

    assert!(!store.set(OrgNode::default_root()));
    assert!(!store.update(|t| delete_node(t, "missing")));
    assert!(!rx.has_changed().unwrap());
    assert_eq!(store.version(), 0);
  }

  #[test]
  fn get_returns_snapshots() {
    let store = TreeStore::default();
    let before = store.get();
    store.update(|t| add_child(t, "root-1"));
    assert!(before.is_leaf());
    assert_eq!(store.get().node_count(), 2);
  }
}
