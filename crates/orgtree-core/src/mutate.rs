//! Tree mutators.
//!
//! Each mutator takes the current tree by reference and returns a new tree
//! reflecting one structural change; the input is never modified. When ids
//! collide, only the first match in pre-order is affected.
//!
//! The plain mutators are total: an unknown target id, or a change that would
//! push a node past [`MAX_DEPTH`], yields a tree equal to the input. The `try_`
//! variants report those cases as [`Error::NodeNotFound`] and
//! [`Error::TooDeep`] for callers that want to surface them.

use crate::{Error, OrgNode, Result, node::MAX_DEPTH};

// ─── Add ─────────────────────────────────────────────────────────────────────

/// Append a placeholder child (generated id, "New Member" / "Position") under
/// `parent_id`.
pub fn add_child(tree: &OrgNode, parent_id: &str) -> OrgNode {
  add_child_node(tree, parent_id, OrgNode::placeholder())
}

/// Append `child` under `parent_id`. No-op if the parent does not exist or the
/// child would land below [`MAX_DEPTH`].
pub fn add_child_node(tree: &OrgNode, parent_id: &str, child: OrgNode) -> OrgNode {
  try_add_child_node(tree, parent_id, child).unwrap_or_else(|_| tree.clone())
}

pub fn try_add_child_node(
  tree: &OrgNode,
  parent_id: &str,
  child: OrgNode,
) -> Result<OrgNode> {
  let Some(level) = tree.level_of(parent_id) else {
    return Err(Error::NodeNotFound(parent_id.to_owned()));
  };
  if level + child.depth() > MAX_DEPTH {
    return Err(Error::TooDeep { id: child.id, max: MAX_DEPTH });
  }
  let mut out = tree.clone();
  if let Some(parent) = find_mut(&mut out, parent_id) {
    parent.children.push(child);
  }
  Ok(out)
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Replace the node whose id equals `updated.id` with `updated`.
///
/// This is a whole-node replacement: `updated.children` becomes the node's
/// subtree, so callers editing scalar fields must carry the old children over.
/// No-op if the id is unknown or the new subtree would reach below
/// [`MAX_DEPTH`].
pub fn update_node(tree: &OrgNode, updated: OrgNode) -> OrgNode {
  try_update_node(tree, updated).unwrap_or_else(|_| tree.clone())
}

pub fn try_update_node(tree: &OrgNode, updated: OrgNode) -> Result<OrgNode> {
  let Some(level) = tree.level_of(&updated.id) else {
    return Err(Error::NodeNotFound(updated.id));
  };
  if level - 1 + updated.depth() > MAX_DEPTH {
    return Err(Error::TooDeep { id: updated.id, max: MAX_DEPTH });
  }
  if tree.id == updated.id {
    return Ok(updated);
  }
  let mut out = tree.clone();
  match find_mut(&mut out, &updated.id) {
    Some(slot) => {
      *slot = updated;
      Ok(out)
    }
    None => Err(Error::NodeNotFound(updated.id)),
  }
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// Remove `node_id` and its entire subtree.
///
/// Only descendants are compared against `node_id`, so the root is never
/// removed. Protecting the root's content is the caller's job (see
/// [`reset_node`]).
pub fn delete_node(tree: &OrgNode, node_id: &str) -> OrgNode {
  let mut out = tree.clone();
  remove_first(&mut out, node_id);
  out
}

/// Like [`delete_node`], but reports an unknown id and refuses the root.
pub fn try_delete_node(tree: &OrgNode, node_id: &str) -> Result<OrgNode> {
  if tree.id == node_id {
    return Err(Error::RootDeletion);
  }
  let mut out = tree.clone();
  match remove_first(&mut out, node_id) {
    Some(_) => Ok(out),
    None => Err(Error::NodeNotFound(node_id.to_owned())),
  }
}

// ─── Reset ───────────────────────────────────────────────────────────────────

/// A copy of `node` with every descriptive field back at the default root's
/// values. `id` and `children` are kept.
pub fn reset_node(node: &OrgNode) -> OrgNode {
  OrgNode {
    id: node.id.clone(),
    children: node.children.clone(),
    ..OrgNode::default_root()
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn find_mut<'a>(node: &'a mut OrgNode, id: &str) -> Option<&'a mut OrgNode> {
  if node.id == id {
    return Some(node);
  }
  node.children.iter_mut().find_map(|c| find_mut(c, id))
}

/// Remove the first descendant of `node` (pre-order) whose id is `id`.
fn remove_first(node: &mut OrgNode, id: &str) -> Option<OrgNode> {
  for i in 0..node.children.len() {
    if node.children[i].id == id {
      return Some(node.children.remove(i));
    }
    if let Some(removed) = remove_first(&mut node.children[i], id) {
      return Some(removed);
    }
  }
  None
}
