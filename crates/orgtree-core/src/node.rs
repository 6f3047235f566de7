//! `OrgNode` — the single entity of an organization chart.
//!
//! A chart is one rooted tree. Each node owns its children outright, so the
//! structure is acyclic and finite by construction. What has to be checked at
//! runtime is id uniqueness and the [`MAX_DEPTH`] limit (see
//! [`OrgNode::validate`]).

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Defaults ────────────────────────────────────────────────────────────────

pub const DEFAULT_ROOT_ID: &str = "root-1";
pub const DEFAULT_ROOT_NAME: &str = "CEO";
pub const DEFAULT_ROOT_POSITION: &str = "Chief Executive Officer";

pub const PLACEHOLDER_NAME: &str = "New Member";
pub const PLACEHOLDER_POSITION: &str = "Position";

/// Deepest chart accepted, counting the root as level one.
///
/// Every chart level costs two levels of JSON nesting, and serde_json stops
/// at 128, so anything much past 60 levels could be built but never loaded
/// back. 48 leaves room for the request and response envelopes.
pub const MAX_DEPTH: usize = 48;

/// Generate an id for a freshly created node.
///
/// Timestamp-derived, with a random suffix so that two nodes created within
/// the same millisecond still differ.
pub fn generate_id() -> String {
  let suffix = Uuid::new_v4().simple().to_string();
  format!("node-{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}

// ─── OrgNode ─────────────────────────────────────────────────────────────────

/// A member of the organization chart and, recursively, everyone reporting
/// to them.
///
/// Missing fields deserialize to their empty values, so a client may post a
/// node without an `id` and let the server assign one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgNode {
  /// Opaque identifier, unique within the tree.
  pub id:          String,
  pub name:        String,
  /// Job-title label.
  pub position:    String,
  pub email:       String,
  pub phone:       String,
  /// Direct reports, in display order.
  pub children:    Vec<OrgNode>,
  /// Foreign key into the external user directory.
  pub user_id:     Option<i64>,
  /// Foreign key into the external job-position directory.
  pub position_id: Option<i64>,
}

impl OrgNode {
  /// The single-node chart used when the backend has nothing stored.
  pub fn default_root() -> Self {
    Self {
      id: DEFAULT_ROOT_ID.to_owned(),
      name: DEFAULT_ROOT_NAME.to_owned(),
      position: DEFAULT_ROOT_POSITION.to_owned(),
      ..Self::default()
    }
  }

  /// A new leaf with a generated id and placeholder labels.
  pub fn placeholder() -> Self {
    Self {
      id: generate_id(),
      name: PLACEHOLDER_NAME.to_owned(),
      position: PLACEHOLDER_POSITION.to_owned(),
      ..Self::default()
    }
  }

  pub fn is_leaf(&self) -> bool { self.children.is_empty() }

  /// Pre-order iterator over this node and all of its descendants.
  pub fn iter(&self) -> PreOrder<'_> { PreOrder { stack: vec![self] } }

  /// First node with `id` in pre-order, if any.
  pub fn find(&self, id: &str) -> Option<&OrgNode> {
    self.iter().find(|n| n.id == id)
  }

  pub fn contains(&self, id: &str) -> bool { self.find(id).is_some() }

  /// Total number of nodes, this one included.
  pub fn node_count(&self) -> usize { self.iter().count() }

  /// Every id in pre-order.
  pub fn ids(&self) -> Vec<&str> { self.iter().map(|n| n.id.as_str()).collect() }

  /// The ids of the node `id` and of its whole subtree. Empty if `id` is not
  /// in the tree.
  pub fn subtree_ids(&self, id: &str) -> Vec<&str> {
    self.find(id).map(OrgNode::ids).unwrap_or_default()
  }

  /// Number of levels, counting this node as level one.
  pub fn depth(&self) -> usize {
    1 + self.children.iter().map(OrgNode::depth).max().unwrap_or(0)
  }

  /// Level of the first node with `id` in pre-order, this node being level
  /// one.
  pub fn level_of(&self, id: &str) -> Option<usize> {
    let mut stack = vec![(self, 1)];
    while let Some((node, level)) = stack.pop() {
      if node.id == id {
        return Some(level);
      }
      stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
    }
    None
  }

  /// Check that every id is non-blank and unique across the tree, and that
  /// no node sits below [`MAX_DEPTH`].
  ///
  /// Reports the first offending node in pre-order.
  pub fn validate(&self) -> Result<()> {
    let mut seen = HashSet::new();
    let mut stack: Vec<(&OrgNode, Option<&str>, usize)> = vec![(self, None, 1)];
    while let Some((node, parent, level)) = stack.pop() {
      if node.id.trim().is_empty() {
        return Err(Error::BlankId { parent: parent.map(str::to_owned) });
      }
      if !seen.insert(node.id.as_str()) {
        return Err(Error::DuplicateId(node.id.clone()));
      }
      if level > MAX_DEPTH {
        return Err(Error::TooDeep { id: node.id.clone(), max: MAX_DEPTH });
      }
      stack.extend(
        node
          .children
          .iter()
          .rev()
          .map(|c| (c, Some(node.id.as_str()), level + 1)),
      );
    }
    Ok(())
  }
}

// ─── Traversal ───────────────────────────────────────────────────────────────

/// Pre-order traversal: a node, then each child subtree in order.
pub struct PreOrder<'a> {
  stack: Vec<&'a OrgNode>,
}

impl<'a> Iterator for PreOrder<'a> {
  type Item = &'a OrgNode;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.stack.pop()?;
    self.stack.extend(node.children.iter().rev());
    Some(node)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leaf(id: &str) -> OrgNode {
    OrgNode { id: id.into(), name: id.to_uppercase(), ..OrgNode::default() }
  }

  fn sample() -> OrgNode {
    let mut a = leaf("a");
    a.children = vec![leaf("a1"), leaf("a2")];
    let mut root = OrgNode::default_root();
    root.children = vec![a, leaf("b")];
    root
  }

  #[test]
  fn default_root_matches_fallback_payload() {
    let root = OrgNode::default_root();
    assert_eq!(root.id, "root-1");
    assert_eq!(root.name, "CEO");
    assert_eq!(root.position, "Chief Executive Officer");
    assert!(root.email.is_empty());
    assert!(root.phone.is_empty());
    assert!(root.is_leaf());
    assert_eq!(root.user_id, None);
  }

  #[test]
  fn placeholders_get_distinct_ids() {
    let a = OrgNode::placeholder();
    let b = OrgNode::placeholder();
    assert_ne!(a.id, b.id);
    assert!(a.id.starts_with("node-"));
    assert_eq!(a.name, PLACEHOLDER_NAME);
    assert_eq!(a.position, PLACEHOLDER_POSITION);
  }

  #[test]
  fn iteration_is_pre_order() {
    assert_eq!(sample().ids(), vec!["root-1", "a", "a1", "a2", "b"]);
  }

  #[test]
  fn subtree_ids_and_depth() {
    let tree = sample();
    assert_eq!(tree.level_of("root-1"), Some(1));
    assert_eq!(tree.level_of("a2"), Some(3));
    assert_eq!(tree.level_of("zzz"), None);
    assert_eq!(tree.subtree_ids("a"), vec!["a", "a1", "a2"]);
    assert!(tree.subtree_ids("zzz").is_empty());
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.node_count(), 5);
  }

  #[test]
  fn validate_reports_duplicates() {
    let mut tree = sample();
    tree.children[1].children.push(leaf("a1"));
    match tree.validate() {
      Err(Error::DuplicateId(id)) => assert_eq!(id, "a1"),
      other => panic!("expected duplicate id error, got {other:?}"),
    }
  }

  #[test]
  fn validate_reports_blank_ids_with_parent() {
    let mut tree = sample();
    tree.children[0].children.push(leaf(" "));
    match tree.validate() {
      Err(Error::BlankId { parent }) => assert_eq!(parent.as_deref(), Some("a")),
      other => panic!("expected blank id error, got {other:?}"),
    }
    assert!(sample().validate().is_ok());
  }

  /// root-1 → c2 → c3 → … → c{levels}
  fn chain(levels: usize) -> OrgNode {
    let mut node = leaf(&format!("c{levels}"));
    for level in (2..levels).rev() {
      let mut parent = leaf(&format!("c{level}"));
      parent.children.push(node);
      node = parent;
    }
    let mut root = OrgNode::default_root();
    if levels > 1 {
      root.children.push(node);
    }
    root
  }

  #[test]
  fn validate_enforces_depth_limit() {
    let deepest = chain(MAX_DEPTH);
    assert_eq!(deepest.depth(), MAX_DEPTH);
    assert!(deepest.validate().is_ok());

    let too_deep = chain(MAX_DEPTH + 1);
    match too_deep.validate() {
      Err(Error::TooDeep { id, max }) => {
        assert_eq!(id, format!("c{}", MAX_DEPTH + 1));
        assert_eq!(max, MAX_DEPTH);
      }
      other => panic!("expected depth error, got {other:?}"),
    }
  }

  #[test]
  fn deepest_chart_fits_in_the_wire_envelopes() {
    use crate::envelope::{LoadResponse, SaveRequest};

    let tree = chain(MAX_DEPTH);

    let json = serde_json::to_string(&SaveRequest { tree: tree.clone() }).unwrap();
    let back: SaveRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tree, tree);

    let json = serde_json::to_string(&LoadResponse::found(tree.clone())).unwrap();
    let back: LoadResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back.data, Some(tree));
  }

  #[test]
  fn missing_fields_deserialize_to_empty() {
    let node: OrgNode =
      serde_json::from_str(r#"{"id":"x","name":"X","position":"P"}"#).unwrap();
    assert!(node.email.is_empty());
    assert!(node.children.is_empty());
    assert_eq!(node.position_id, None);

    let json = serde_json::to_value(OrgNode::default_root()).unwrap();
    assert_eq!(json["children"], serde_json::json!([]));
    assert_eq!(json["user_id"], serde_json::Value::Null);
  }
}
