//! Curated surface for callers (UNSTABLE).
//!
//! Prefer these re-exports over reaching into submodules; the internal layout
//! is allowed to change.

// Graph store
pub use crate::graph::{Edge, EdgeId, EdgeKey, Graph, NodeId, StoreCfg, Total, Weight};
// Engine
pub use crate::engine::{CacheState, Label, LexiEngine, SearchStats};
// Text protocol
pub use crate::protocol::{Answer, Command, ProtocolError, Script, Transcript};
// Workload generation
pub use crate::rand::{draw_script, CommandMix, ReplayToken, WorkloadCfg};
