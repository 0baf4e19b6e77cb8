//! Labels, cache state, and search counters.

use crate::graph::{NodeId, Total, Weight};

/// Best-known path label: total weight first, bottleneck as tie-break.
///
/// The derived `Ord` compares fields in declaration order, which is exactly
/// the lexicographic order used both by the queue and by relaxation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    pub total: Total,
    pub bottleneck: Weight,
}

impl Label {
    /// "Infinite" sentinel held by unreached nodes.
    pub const UNREACHED: Self = Self {
        total: Total::MAX,
        bottleneck: Weight::MAX,
    };
    /// Label of the source itself.
    pub const SOURCE: Self = Self {
        total: 0,
        bottleneck: 0,
    };

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.total != Total::MAX
    }

    /// Label after following one more edge of weight `w`.
    #[inline]
    pub fn extend(&self, w: Weight) -> Self {
        Self {
            total: self.total.saturating_add(Total::from(w)),
            bottleneck: self.bottleneck.max(w),
        }
    }
}

/// Validity of the cached labels relative to the current graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    Clean,
    Dirty,
}

/// Counters from one full recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Queue entries popped, stale ones included.
    pub pops: usize,
    /// Popped entries discarded because a better label had been pushed since.
    pub stale_pops: usize,
    /// Relaxations that improved a label (one push each).
    pub relaxations: usize,
    /// Nodes settled with a final label.
    pub settled: usize,
}

/// Priority-queue entry: a label as it was when pushed, for `node`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Candidate {
    pub label: Label,
    pub node: NodeId,
}
