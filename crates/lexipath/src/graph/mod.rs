//! Directed Graph Store: append-only edge log with soft deletion.
//!
//! Purpose
//! - Own every edge ever created (alive or dead) behind a stable `EdgeId`,
//!   the per-node outgoing adjacency (insertion order, dead ids included),
//!   and a `(u, v, w)` index used by removal.
//!
//! Invariants
//! - Edge ids are dense, start at 0, and are never reused or invalidated.
//! - An edge's `(from, to, weight)` never changes; only `alive` flips, once.
//! - Capacity only grows. Every index `<= node_capacity()` is a node.
//! - Node indices are at most `cfg::MAX_NODE`; larger ones panic.
//!
//! Removal order
//! - Duplicates of the same `(u, v, w)` are removed last-added-first. This is
//!   the observed behaviour of a per-key stack rather than a designed
//!   tie-break; it only decides which of several identical parallel edges
//!   survives, which no shortest-path label can observe.

mod store;
mod types;

pub use store::Graph;
pub use types::{Edge, EdgeId, EdgeKey, NodeId, StoreCfg, Total, Weight};
