//! Dynamic lexicographic shortest paths.
//!
//! A directed graph with integer weights that mutates between queries, and an
//! engine answering "among all minimum-total-weight paths from the source to
//! `t`, what is the smallest possible maximum edge weight?".
//!
//! Layout
//! - `graph`: append-only edge log, per-node adjacency, `(u, v, w)` removal index.
//! - `engine`: cached labels, dirty/clean state, lexicographic Dijkstra.
//! - `protocol`: the line-oriented `ADD`/`REM`/`ASK` text format.
//! - `rand`: reproducible workload generation for tests and benches.
//!
//! API Policy
//! - `api` is the curated surface; modules may be reorganised freely.

pub mod api;
pub mod cfg;
pub mod engine;
pub mod graph;
pub mod protocol;
pub mod rand;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::engine::{CacheState, Label, LexiEngine, SearchStats};
    pub use crate::graph::{Edge, EdgeId, EdgeKey, Graph, NodeId, StoreCfg, Total, Weight};
    pub use crate::protocol::{Answer, Command, ProtocolError, Script, Transcript};
    pub use crate::rand::{draw_script, CommandMix, ReplayToken, WorkloadCfg};
}
