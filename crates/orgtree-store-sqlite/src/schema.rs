//! SQL schema for the orgtree SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The chart is stored as one JSON document. There is at most one row;
-- every save overwrites it.
CREATE TABLE IF NOT EXISTS org_chart (
    chart_id   INTEGER PRIMARY KEY CHECK (chart_id = 1),
    tree_json  TEXT NOT NULL,   -- the whole OrgNode tree
    saved_at   TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";
