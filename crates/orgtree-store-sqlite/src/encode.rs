//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, the tree as compact JSON.

use chrono::{DateTime, Utc};
use orgtree_core::{OrgNode, repository::StoredChart};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── OrgNode ──────────────────────────────────────────────────────────────────

pub fn encode_tree(tree: &OrgNode) -> Result<String> { Ok(serde_json::to_string(tree)?) }

pub fn decode_tree(s: &str) -> Result<OrgNode> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from the `org_chart` row.
pub struct RawChart {
  pub tree_json: String,
  pub saved_at:  String,
}

impl RawChart {
  pub fn into_chart(self) -> Result<StoredChart> {
    Ok(StoredChart {
      tree:     decode_tree(&self.tree_json)?,
      saved_at: decode_dt(&self.saved_at)?,
    })
  }
}
