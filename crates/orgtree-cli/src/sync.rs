//! Sync adapter between the in-memory chart and the backend resource.
//!
//! Loading never fails: anything short of a stored chart yields the default
//! single-node tree, so the editor always has something to show. Saving
//! reports failures as a message and leaves the caller's tree alone.

use orgtree_core::{OrgNode, envelope::LoadResponse};

use crate::client::ApiClient;

pub const SAVE_FAILED: &str = "Failed to save org chart";

/// Result of a save, in the shape of the backend envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
  pub success: bool,
  pub message: Option<String>,
}

pub struct SyncAdapter {
  client: ApiClient,
}

impl SyncAdapter {
  pub fn new(client: ApiClient) -> Self { Self { client } }

  /// Fetch the stored chart, falling back to [`OrgNode::default_root`].
  pub async fn load(&self) -> OrgNode {
    match self.client.get_chart().await {
      Ok(LoadResponse { success: true, data: Some(tree) }) => {
        tracing::debug!(nodes = tree.node_count(), "chart loaded");
        tree
      }
      Ok(LoadResponse { success: true, data: None }) => {
        tracing::debug!("no chart stored yet, starting from the default root");
        OrgNode::default_root()
      }
      Ok(LoadResponse { success: false, .. }) => {
        tracing::warn!("backend declined to load the chart, using the default root");
        OrgNode::default_root()
      }
      Err(e) => {
        tracing::warn!(error = %format!("{e:#}"), "chart load failed, using the default root");
        OrgNode::default_root()
      }
    }
  }

  /// Send `tree` as the full replacement state.
  pub async fn save(&self, tree: &OrgNode) -> SaveOutcome {
    match self.client.post_chart(tree).await {
      Ok(resp) if resp.success => SaveOutcome { success: true, message: resp.message },
      Ok(resp) => {
        let message = resp.message.unwrap_or_else(|| SAVE_FAILED.to_owned());
        tracing::warn!(%message, "chart save rejected");
        SaveOutcome { success: false, message: Some(message) }
      }
      Err(e) => {
        tracing::warn!(error = %format!("{e:#}"), "chart save failed");
        SaveOutcome { success: false, message: Some(format!("{SAVE_FAILED}: {e:#}")) }
      }
    }
  }
}
