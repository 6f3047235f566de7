//! The `ChartRepository` trait — backend persistence for a chart.
//!
//! The trait is implemented by storage backends (e.g. `orgtree-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::OrgNode;

/// The persisted chart document together with the time it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChart {
  pub tree:     OrgNode,
  /// Server-assigned; set on every save.
  pub saved_at: DateTime<Utc>,
}

/// Abstraction over a chart persistence backend.
///
/// The whole tree is one document: every save overwrites whatever was stored
/// before (last write wins). There is no partial update and no versioning.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ChartRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The last saved chart, or `None` if nothing has been saved yet.
  fn load_chart(
    &self,
  ) -> impl Future<Output = Result<Option<StoredChart>, Self::Error>> + Send + '_;

  /// Replace the stored chart with `tree`.
  fn save_chart(
    &self,
    tree: OrgNode,
  ) -> impl Future<Output = Result<StoredChart, Self::Error>> + Send + '_;
}
