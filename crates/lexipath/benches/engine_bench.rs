//! Criterion benchmarks for the lexicographic engine.
//! Focus sizes: nodes in {100, 1000, 10000} with ~4 edges per node.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lexipath::api::{draw_script, CommandMix, NodeId, ReplayToken, WorkloadCfg};

fn workload(nodes: usize, commands: usize) -> WorkloadCfg {
    WorkloadCfg {
        nodes,
        initial_edges: nodes * 4,
        commands,
        ..WorkloadCfg::default()
    }
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    for &nodes in &[100usize, 1_000, 10_000] {
        let tok = ReplayToken {
            seed: 42,
            index: nodes as u64,
        };

        group.bench_with_input(BenchmarkId::new("full_recompute", nodes), &nodes, |b, &n| {
            let script = draw_script(workload(n, 0), tok);
            b.iter_batched(
                || script.load(),
                |mut engine| {
                    let _ = engine.ask(NodeId(n));
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("clean_ask", nodes), &nodes, |b, &n| {
            let mut engine = draw_script(workload(n, 0), tok).load();
            let _ = engine.ask(NodeId(1));
            let mut t = 0usize;
            b.iter(|| {
                t = t % n + 1;
                engine.ask(NodeId(t))
            })
        });

        group.bench_with_input(BenchmarkId::new("mixed_script", nodes), &nodes, |b, &n| {
            let cfg = WorkloadCfg {
                mix: CommandMix {
                    add: 1,
                    remove: 1,
                    ask: 2,
                },
                ..workload(n, 200)
            };
            let script = draw_script(cfg, tok);
            b.iter(|| script.run())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
