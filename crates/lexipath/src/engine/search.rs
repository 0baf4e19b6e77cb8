//! Lexicographic Dijkstra with lazy deletion.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeId};

use super::types::{Candidate, Label, SearchStats};

/// Recompute every label in `labels` from `source` over the alive edges of `g`.
///
/// `labels` must already address every node of `g` and `source`. There is no
/// decrease-key: every improvement is pushed, and pops whose label no longer
/// matches the table are dropped.
pub(crate) fn relabel_from(g: &Graph, source: NodeId, labels: &mut [Label]) -> SearchStats {
    labels.fill(Label::UNREACHED);
    labels[source.0] = Label::SOURCE;

    let mut stats = SearchStats::default();
    let mut heap = BinaryHeap::new();
    heap.push(Reverse(Candidate {
        label: Label::SOURCE,
        node: source,
    }));

    while let Some(Reverse(cur)) = heap.pop() {
        stats.pops += 1;
        if cur.label != labels[cur.node.0] {
            stats.stale_pops += 1;
            continue;
        }
        stats.settled += 1;
        for e in g.alive_out_edges(cur.node) {
            let next = cur.label.extend(e.weight);
            let slot = &mut labels[e.to.0];
            if next < *slot {
                *slot = next;
                stats.relaxations += 1;
                heap.push(Reverse(Candidate {
                    label: next,
                    node: e.to,
                }));
            }
        }
    }
    stats
}
