//! Editing session: the tree store, the mutators and the sync adapter wired
//! together.
//!
//! This is where the root is protected: removing the root resets its details
//! instead of deleting it. Unknown ids come back as
//! [`orgtree_core::Error::NodeNotFound`] so the user hears about typos.

use std::sync::Arc;

use orgtree_core::{
  OrgNode, Result, TreeStore,
  mutate::{reset_node, try_add_child_node, try_delete_node, try_update_node, update_node},
};

use crate::sync::{SaveOutcome, SyncAdapter};

// ─── Patch ────────────────────────────────────────────────────────────────────

/// Field-level changes to one member. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
  pub name:        Option<String>,
  pub position:    Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub user_id:     Option<i64>,
  pub position_id: Option<i64>,
}

impl NodePatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// The full replacement node for `node`, children included.
  pub fn apply(&self, node: &OrgNode) -> OrgNode {
    let mut out = node.clone();
    if let Some(v) = &self.name {
      out.name = v.clone();
    }
    if let Some(v) = &self.position {
      out.position = v.clone();
    }
    if let Some(v) = &self.email {
      out.email = v.clone();
    }
    if let Some(v) = &self.phone {
      out.phone = v.clone();
    }
    if self.user_id.is_some() {
      out.user_id = self.user_id;
    }
    if self.position_id.is_some() {
      out.position_id = self.position_id;
    }
    out
  }
}

// ─── Editor ───────────────────────────────────────────────────────────────────

/// What a remove actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
  /// The member and everyone under them are gone.
  Deleted,
  /// The target was the root; its details were reset instead.
  RootReset,
}

pub struct Editor {
  store:        TreeStore,
  sync:         SyncAdapter,
  /// Last user-facing message (e.g. the outcome of a save).
  notification: Option<String>,
}

impl Editor {
  pub fn new(sync: SyncAdapter) -> Self {
    Self { store: TreeStore::default(), sync, notification: None }
  }

  pub fn tree(&self) -> Arc<OrgNode> { self.store.get() }

  pub fn notification(&self) -> Option<&str> { self.notification.as_deref() }

  // ── Sync ──────────────────────────────────────────────────────────────────

  /// Replace the in-memory tree with whatever the backend has.
  pub async fn load(&mut self) {
    let tree = self.sync.load().await;
    self.store.set(tree);
  }

  /// Persist the whole tree. On success the tree is reloaded so ids assigned
  /// by the server show up; on failure the in-memory tree is kept as is.
  pub async fn save(&mut self) -> SaveOutcome {
    let tree = self.store.get();
    let outcome = self.sync.save(&tree).await;
    if outcome.success {
      self.load().await;
    }
    self.notification = outcome.message.clone();
    outcome
  }

  // ── Edits ─────────────────────────────────────────────────────────────────

  /// Add a placeholder member under `parent_id` and return its id.
  pub fn add_member(&mut self, parent_id: &str) -> Result<String> {
    let child = OrgNode::placeholder();
    let id = child.id.clone();
    let next = try_add_child_node(&self.store.get(), parent_id, child)?;
    self.store.set(next);
    Ok(id)
  }

  pub fn edit_member(&mut self, id: &str, patch: &NodePatch) -> Result<()> {
    let current = self.store.get();
    let Some(node) = current.find(id) else {
      return Err(orgtree_core::Error::NodeNotFound(id.to_owned()));
    };
    let next = try_update_node(&current, patch.apply(node))?;
    self.store.set(next);
    Ok(())
  }

  pub fn remove_member(&mut self, id: &str) -> Result<Removal> {
    let current = self.store.get();
    if current.id == id {
      self.store.update(|tree| update_node(tree, reset_node(tree)));
      return Ok(Removal::RootReset);
    }
    let next = try_delete_node(&current, id)?;
    self.store.set(next);
    Ok(Removal::Deleted)
  }

  /// Swap in a whole new tree (e.g. from an import file).
  pub fn replace_tree(&mut self, tree: OrgNode) -> Result<()> {
    tree.validate()?;
    self.store.set(tree);
    Ok(())
  }
}
