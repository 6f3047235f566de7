//! Error types for `orgtree-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("node not found: {0}")]
  NodeNotFound(String),

  #[error("the root node cannot be deleted")]
  RootDeletion,

  #[error("duplicate node id: {0}")]
  DuplicateId(String),

  #[error("node has a blank id (parent: {parent:?})")]
  BlankId { parent: Option<String> },

  #[error("node {id} would sit below the {max}-level depth limit")]
  TooDeep { id: String, max: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
