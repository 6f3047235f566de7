//! Core types for the orgtree organization-chart editor.
//!
//! The chart is a single rooted tree of [`OrgNode`]s. This crate holds the
//! tree itself, the pure mutators over it, the observable [`TreeStore`], the
//! wire envelopes and the persistence trait. It is deliberately free of HTTP
//! and database dependencies.

pub mod envelope;
pub mod error;
pub mod mutate;
pub mod node;
pub mod repository;
pub mod store;

pub use error::{Error, Result};
pub use node::OrgNode;
pub use store::TreeStore;
