//! Lexicographic Shortest-Path Engine with lazy recompute.
//!
//! Purpose
//! - For a fixed source `S`, answer "smallest bottleneck among the
//!   minimum-total-weight paths `S -> t`" while the graph mutates between
//!   queries.
//!
//! State machine
//! - `Dirty` on construction, after every `add_edge`, after every removal that
//!   actually removed something, and after `touch`.
//! - A query in `Dirty` runs one full recompute and moves to `Clean`; queries
//!   in `Clean` only read the cached labels. Many mutations followed by one
//!   query cost exactly one recompute.
//!
//! Code cross-refs: `graph::Graph`, `search::relabel_from`.

mod search;
mod types;

pub use types::{CacheState, Label, SearchStats};

use crate::graph::{EdgeId, Graph, NodeId, Total, Weight};

/// Query engine owning its graph and the cached labels from one source.
#[derive(Clone, Debug)]
pub struct LexiEngine {
    graph: Graph,
    source: NodeId,
    labels: Vec<Label>,
    state: CacheState,
    recomputes: u64,
    last_stats: Option<SearchStats>,
}

impl LexiEngine {
    /// Engine over an empty graph.
    pub fn new(source: NodeId) -> Self {
        Self::from_graph(Graph::new(), source)
    }

    /// Adopt a pre-loaded graph. Starts `Dirty`, so no `touch` is needed here.
    pub fn from_graph(graph: Graph, source: NodeId) -> Self {
        let mut engine = Self {
            graph,
            source,
            labels: Vec::new(),
            state: CacheState::Dirty,
            recomputes: 0,
            last_stats: None,
        };
        engine.grow_to_include(source);
        let cap = engine.graph.node_capacity();
        engine.grow_to_include(NodeId(cap));
        engine
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Raw access to the graph. Mutations made here do not dirty the cache;
    /// call `touch` afterwards.
    #[inline]
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    #[inline]
    pub fn state(&self) -> CacheState {
        self.state
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state == CacheState::Dirty
    }

    /// Number of full recomputes run so far.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Counters of the most recent recompute, if any ran.
    #[inline]
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    /// Add `from -> to` with weight `weight` and mark the cache dirty.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> EdgeId {
        let id = self.graph.add_edge(from, to, weight);
        self.grow_to_include(from.max(to));
        self.state = CacheState::Dirty;
        id
    }

    /// Remove one matching alive edge. Dirties the cache only if something
    /// was removed.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> bool {
        let removed = self.graph.remove_edge(from, to, weight);
        if removed {
            self.state = CacheState::Dirty;
        } else {
            tracing::trace!(from = from.0, to = to.0, weight, "remove_noop");
        }
        removed
    }

    /// Force the next query to recompute.
    pub fn touch(&mut self) {
        self.state = CacheState::Dirty;
    }

    /// Smallest bottleneck among minimum-total-weight paths to `t`;
    /// `None` when `t` is unreachable.
    pub fn ask(&mut self, t: NodeId) -> Option<Weight> {
        self.label(t).map(|l| l.bottleneck)
    }

    /// Minimum total weight to `t`; `None` when unreachable.
    pub fn distance(&mut self, t: NodeId) -> Option<Total> {
        self.label(t).map(|l| l.total)
    }

    /// Full label for `t`, recomputing first if the cache is dirty.
    ///
    /// # Panics
    /// If `t` exceeds `cfg::MAX_NODE` (see `Graph::ensure_node`).
    pub fn label(&mut self, t: NodeId) -> Option<Label> {
        self.grow_to_include(t);
        if self.is_dirty() {
            self.recompute();
        }
        let label = self.labels[t.0];
        label.is_reached().then_some(label)
    }

    fn grow_to_include(&mut self, node: NodeId) {
        self.graph.ensure_node(node);
        let need = node.0 + 1;
        if self.labels.len() < need {
            self.labels.resize(need, Label::UNREACHED);
        }
    }

    fn recompute(&mut self) {
        let cap = self.graph.node_capacity();
        self.grow_to_include(NodeId(cap));
        let stats = search::relabel_from(&self.graph, self.source, &mut self.labels);
        self.recomputes += 1;
        self.last_stats = Some(stats);
        self.state = CacheState::Clean;
        tracing::debug!(
            source = self.source.0,
            nodes = self.labels.len(),
            settled = stats.settled,
            pops = stats.pops,
            stale_pops = stats.stale_pops,
            relaxations = stats.relaxations,
            "recompute"
        );
    }
}
