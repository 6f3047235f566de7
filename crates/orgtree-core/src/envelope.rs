//! JSON envelopes exchanged with the chart endpoint.
//!
//! | Method | Body | Response |
//! |--------|------|----------|
//! | `GET`  | — | [`LoadResponse`] |
//! | `POST` | [`SaveRequest`] | [`SaveResponse`] |

use serde::{Deserialize, Serialize};

use crate::OrgNode;

/// `{ "success": bool, "data"?: OrgNode }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data:    Option<OrgNode>,
}

impl LoadResponse {
  pub fn found(tree: OrgNode) -> Self { Self { success: true, data: Some(tree) } }

  pub fn empty() -> Self { Self { success: true, data: None } }
}

/// `{ "tree": OrgNode }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
  pub tree: OrgNode,
}

/// `{ "success": bool, "message"?: string }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl SaveResponse {
  pub fn ok(message: impl Into<String>) -> Self {
    Self { success: true, message: Some(message.into()) }
  }

  pub fn failed(message: impl Into<String>) -> Self {
    Self { success: false, message: Some(message.into()) }
  }
}
