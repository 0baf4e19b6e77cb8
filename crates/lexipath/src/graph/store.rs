//! Edge log, adjacency lists, and the `(u, v, w)` removal index.

use std::collections::HashMap;

use crate::cfg::MAX_NODE;

use super::types::{Edge, EdgeId, EdgeKey, NodeId, StoreCfg, Weight};

/// Directed graph with stable edge ids and soft deletion.
///
/// Nodes are implicit: any index `<= node_capacity()` exists, edges or not.
#[derive(Clone, Debug)]
pub struct Graph {
    edges: Vec<Edge>,
    adj: Vec<Vec<EdgeId>>, // edge ids out of node k, insertion order, dead ones kept
    by_key: HashMap<EdgeKey, Vec<EdgeId>>, // alive ids per triple; last is removed first
    alive: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::with_cfg(StoreCfg::default())
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph addressing nodes `0..=n` up front.
    pub fn with_nodes(n: usize) -> Self {
        Self::with_cfg(StoreCfg {
            initial_nodes: n,
            ..StoreCfg::default()
        })
    }

    /// # Panics
    /// If `cfg.initial_nodes` exceeds `MAX_NODE`.
    pub fn with_cfg(cfg: StoreCfg) -> Self {
        assert_node_in_range(cfg.initial_nodes);
        Self {
            edges: Vec::with_capacity(cfg.edge_reserve),
            adj: vec![Vec::new(); cfg.initial_nodes + 1],
            by_key: HashMap::with_capacity(cfg.edge_reserve),
            alive: 0,
        }
    }

    /// Grow so that `node` is addressable. Never shrinks.
    ///
    /// # Panics
    /// If `node` exceeds `MAX_NODE`.
    pub fn ensure_node(&mut self, node: NodeId) {
        assert_node_in_range(node.0);
        let need = node.0 + 1;
        if self.adj.len() < need {
            self.adj.resize_with(need, Vec::new);
        }
    }

    /// Append a new alive edge `from -> to` and return its id.
    ///
    /// # Panics
    /// If either endpoint exceeds `MAX_NODE`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> EdgeId {
        self.ensure_node(from);
        self.ensure_node(to);
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            from,
            to,
            weight,
            alive: true,
        });
        self.adj[from.0].push(id);
        self.by_key
            .entry(EdgeKey::new(from, to, weight))
            .or_default()
            .push(id);
        self.alive += 1;
        id
    }

    /// Mark one alive edge matching `(from, to, weight)` dead.
    ///
    /// Among duplicates the most recently added one goes first. Returns
    /// `false` (and changes nothing) when no alive match exists.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> bool {
        let key = EdgeKey::new(from, to, weight);
        let Some(stack) = self.by_key.get_mut(&key) else {
            return false;
        };
        let Some(id) = stack.pop() else {
            return false;
        };
        if stack.is_empty() {
            self.by_key.remove(&key);
        }
        self.edges[id.0].alive = false;
        self.alive -= 1;
        true
    }

    /// Outgoing edge ids of `node` in insertion order, dead ones included.
    /// Out-of-range nodes have no edges.
    pub fn outgoing_edges(&self, node: NodeId) -> &[EdgeId] {
        self.adj.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Alive outgoing edges of `node`.
    pub fn alive_out_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing_edges(node)
            .iter()
            .map(|&id| &self.edges[id.0])
            .filter(|e| e.alive)
    }

    /// Edge record for an id previously returned by `add_edge`.
    ///
    /// Panics on an id that was never issued; ids only come from `add_edge`.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All edges ever created, with their ids.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Highest addressable node index.
    #[inline]
    pub fn node_capacity(&self) -> usize {
        self.adj.len() - 1
    }

    /// Number of edges ever created, dead ones included.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn alive_edge_count(&self) -> usize {
        self.alive
    }
}

#[inline]
fn assert_node_in_range(index: usize) {
    assert!(
        index <= MAX_NODE,
        "node index {index} exceeds MAX_NODE ({MAX_NODE})"
    );
}
