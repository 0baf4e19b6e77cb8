//! Random workloads (initial graph + command stream) with replay tokens.
//!
//! Purpose
//! - Reproducible scripts for benches, property tests, and `lexipath gen`.
//!
//! Model
//! - Nodes are `1..=nodes`; weights are uniform in `0..=max_weight`.
//! - Commands are drawn from `CommandMix` weights. A `REM` targets a currently
//!   alive edge with probability `remove_hit`, otherwise a random triple that
//!   usually matches nothing (exercising the no-op path). A random triple that
//!   does match removes that edge, so the alive set tracked here always equals
//!   the graph's after replay.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::MAX_NODE;
use crate::graph::{EdgeKey, NodeId, Weight};
use crate::protocol::{Command, Script};

/// Relative frequencies of the three command kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandMix {
    pub add: u32,
    pub remove: u32,
    pub ask: u32,
}

impl Default for CommandMix {
    fn default() -> Self {
        Self {
            add: 3,
            remove: 2,
            ask: 5,
        }
    }
}

/// Workload shape.
#[derive(Clone, Copy, Debug)]
pub struct WorkloadCfg {
    pub nodes: usize,
    pub initial_edges: usize,
    pub commands: usize,
    pub max_weight: Weight,
    pub mix: CommandMix,
    /// Probability that a `REM` names an alive edge. Clamped to [0, 1].
    pub remove_hit: f64,
}

impl Default for WorkloadCfg {
    fn default() -> Self {
        Self {
            nodes: 100,
            initial_edges: 400,
            commands: 1000,
            max_weight: 100,
            mix: CommandMix::default(),
            remove_hit: 0.8,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random script; source is node 1.
pub fn draw_script(cfg: WorkloadCfg, tok: ReplayToken) -> Script {
    draw_tracked(cfg, tok).0
}

/// Script plus the keys alive after replaying it, one entry per alive edge.
pub(crate) fn draw_tracked(cfg: WorkloadCfg, tok: ReplayToken) -> (Script, Vec<EdgeKey>) {
    let mut rng = tok.to_std_rng();
    let nodes = cfg.nodes.clamp(1, MAX_NODE);
    let hit = cfg.remove_hit.clamp(0.0, 1.0);
    let mix = cfg.mix;
    let mix_total = u64::from(mix.add) + u64::from(mix.remove) + u64::from(mix.ask);

    let edges: Vec<EdgeKey> = (0..cfg.initial_edges)
        .map(|_| random_edge(&mut rng, nodes, cfg.max_weight))
        .collect();
    let mut alive = edges.clone();

    let mut commands = Vec::with_capacity(cfg.commands);
    for _ in 0..cfg.commands {
        let roll = if mix_total == 0 {
            // Degenerate mix: queries only.
            u64::from(mix.add) + u64::from(mix.remove)
        } else {
            rng.gen_range(0..mix_total)
        };
        let cmd = if roll < u64::from(mix.add) {
            let k = random_edge(&mut rng, nodes, cfg.max_weight);
            alive.push(k);
            Command::Add(k)
        } else if roll < u64::from(mix.add) + u64::from(mix.remove) {
            if !alive.is_empty() && rng.gen_bool(hit) {
                let i = rng.gen_range(0..alive.len());
                Command::Remove(alive.swap_remove(i))
            } else {
                let k = random_edge(&mut rng, nodes, cfg.max_weight);
                if let Some(i) = alive.iter().position(|a| *a == k) {
                    alive.swap_remove(i);
                }
                Command::Remove(k)
            }
        } else {
            Command::Ask(NodeId(rng.gen_range(1..=nodes)))
        };
        commands.push(cmd);
    }

    let script = Script {
        nodes,
        source: NodeId(1),
        edges,
        commands,
    };
    (script, alive)
}

fn random_edge<R: Rng>(rng: &mut R, nodes: usize, max_weight: Weight) -> EdgeKey {
    EdgeKey::new(
        NodeId(rng.gen_range(1..=nodes)),
        NodeId(rng.gen_range(1..=nodes)),
        rng.gen_range(0..=max_weight),
    )
}
