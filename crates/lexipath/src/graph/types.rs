//! Identifier and record types for the graph store.

use crate::cfg::{EDGE_RESERVE, INITIAL_NODES};

/// Non-negative edge weight.
pub type Weight = u32;
/// Path weight sum.
pub type Total = u64;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// One directed edge `from -> to`. Only `alive` ever changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
    pub alive: bool,
}

impl Edge {
    #[inline]
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            from: self.from,
            to: self.to,
            weight: self.weight,
        }
    }
}

/// Removal-index key: the full `(u, v, w)` triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl EdgeKey {
    #[inline]
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }
}

/// Store sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreCfg {
    /// Highest node index addressable before any edge is added.
    pub initial_nodes: usize,
    /// Slots reserved in the edge log and removal index.
    pub edge_reserve: usize,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            initial_nodes: INITIAL_NODES,
            edge_reserve: EDGE_RESERVE,
        }
    }
}
