//! Fixed defaults (internal).
//!
//! Policy
//! - Sizing hints do not affect results, just allocation behaviour;
//!   `StoreCfg` exposes them for callers that know their input size.
//! - `MAX_NODE` bounds every node index, so sizing arrays to `index + 1`
//!   cannot overflow.

/// Edge-log and removal-index slots reserved up front by `Graph::new`.
pub(crate) const EDGE_RESERVE: usize = 1024;

/// Node slots addressable by a fresh graph (indices `0..=INITIAL_NODES`).
pub(crate) const INITIAL_NODES: usize = 0;

/// Highest node index the store accepts; matches a signed 32-bit index.
pub const MAX_NODE: usize = i32::MAX as usize;
