//! Handlers for the `/orgchart` endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/orgchart` | `{"success":true,"data":<tree>}`; `data` absent if nothing was saved |
//! | `POST` | `/orgchart` | Body: `{"tree":<tree>}`; replaces the stored chart wholesale |

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use orgtree_core::{
  OrgNode,
  envelope::{LoadResponse, SaveRequest, SaveResponse},
  repository::ChartRepository,
};
use uuid::Uuid;

use crate::error::ApiError;

pub const SAVED_MESSAGE: &str = "Org chart saved";

// ─── Load ─────────────────────────────────────────────────────────────────────

/// `GET /orgchart`
pub async fn load<R>(State(repo): State<Arc<R>>) -> Result<Json<LoadResponse>, ApiError>
where
  R: ChartRepository,
  R::Error: std::error::Error + Send + Sync + 'static,
{
  let chart = repo
    .load_chart()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(match chart {
    Some(chart) => {
      tracing::debug!(saved_at = %chart.saved_at, nodes = chart.tree.node_count(), "chart loaded");
      LoadResponse::found(chart.tree)
    }
    None => LoadResponse::empty(),
  }))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

/// `POST /orgchart` — body: `{"tree": <OrgNode>}`.
///
/// Nodes posted with a blank id are given a server-assigned one; clients
/// reload after saving to pick those up. Duplicate ids are rejected with 400.
pub async fn save<R>(
  State(repo): State<Arc<R>>,
  body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError>
where
  R: ChartRepository,
  R::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(SaveRequest { mut tree }) = body?;

  let assigned = assign_missing_ids(&mut tree);
  tree.validate()?;

  let chart = repo
    .save_chart(tree)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(
    nodes = chart.tree.node_count(),
    assigned,
    saved_at = %chart.saved_at,
    "chart saved"
  );
  Ok(Json(SaveResponse::ok(SAVED_MESSAGE)))
}

// ─── Normalisation ────────────────────────────────────────────────────────────

/// Give every node with a blank id a fresh `node-<uuid>` id. Returns the
/// number of ids assigned.
pub fn assign_missing_ids(node: &mut OrgNode) -> usize {
  let mut assigned = 0;
  if node.id.trim().is_empty() {
    node.id = format!("node-{}", Uuid::new_v4());
    assigned += 1;
  }
  for child in &mut node.children {
    assigned += assign_missing_ids(child);
  }
  assigned
}
