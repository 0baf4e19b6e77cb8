//! Walk through the reference scenario and print each answer with its label.
//!
//! Run: `cargo run -p lexipath --example reference_scenario`

use lexipath::api::{LexiEngine, NodeId};

fn main() {
    let n = NodeId;
    let mut engine = LexiEngine::new(n(1));
    for (u, v, w) in [(1, 2, 3), (1, 3, 5), (2, 4, 4), (3, 4, 4), (4, 5, 6)] {
        engine.add_edge(n(u), n(v), w);
    }
    report(&mut engine, "initial", 5);
    engine.add_edge(n(1), n(5), 100);
    report(&mut engine, "ADD 1 5 100", 5);
    engine.remove_edge(n(4), n(5), 6);
    report(&mut engine, "REM 4 5 6", 5);
    engine.add_edge(n(3), n(5), 7);
    report(&mut engine, "ADD 3 5 7", 5);
    report(&mut engine, "(cached)", 4);
    println!("recomputes={}", engine.recompute_count());
}

fn report(engine: &mut LexiEngine, step: &str, t: usize) {
    match engine.label(NodeId(t)) {
        Some(l) => println!(
            "{step:<12} ask({t}) = {} (total={})",
            l.bottleneck, l.total
        ),
        None => println!("{step:<12} ask({t}) = -1"),
    }
}
