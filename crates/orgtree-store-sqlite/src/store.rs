//! [`SqliteRepository`] — the SQLite implementation of [`ChartRepository`].

use std::path::Path;

use chrono::Utc;
use orgtree_core::{
  OrgNode,
  repository::{ChartRepository, StoredChart},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{RawChart, encode_dt, encode_tree},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A chart repository backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteRepository {
  conn: tokio_rusqlite::Connection,
}

impl SqliteRepository {
  /// Open (or create) a repository at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let repo = Self { conn };
    repo.init_schema().await?;
    Ok(repo)
  }

  /// Open an in-memory repository — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let repo = Self { conn };
    repo.init_schema().await?;
    Ok(repo)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ChartRepository impl ────────────────────────────────────────────────────

impl ChartRepository for SqliteRepository {
  type Error = crate::Error;

  async fn load_chart(&self) -> Result<Option<StoredChart>> {
    let raw: Option<RawChart> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT tree_json, saved_at FROM org_chart WHERE chart_id = 1",
              [],
              |row| {
                Ok(RawChart {
                  tree_json: row.get(0)?,
                  saved_at:  row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawChart::into_chart).transpose()
  }

  async fn save_chart(&self, tree: OrgNode) -> Result<StoredChart> {
    tree.validate()?;

    let chart = StoredChart { tree, saved_at: Utc::now() };
    let tree_json = encode_tree(&chart.tree)?;
    let saved_at = encode_dt(chart.saved_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO org_chart (chart_id, tree_json, saved_at) VALUES (1, ?1, ?2)
           ON CONFLICT (chart_id) DO UPDATE
             SET tree_json = excluded.tree_json, saved_at = excluded.saved_at",
          rusqlite::params![tree_json, saved_at],
        )?;
        Ok(())
      })
      .await?;

    Ok(chart)
  }
}
