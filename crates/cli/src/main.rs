use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexipath::api::{draw_script, Answer, ReplayToken, Script, Transcript, WorkloadCfg};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Provenance};

#[derive(Parser)]
#[command(name = "lexipath")]
#[command(about = "Dynamic lexicographic shortest paths over ADD/REM/ASK scripts")]
struct Cmd {
    /// Log each engine recompute to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Execute a script and print one answer per ASK (-1 when unreachable)
    Run {
        /// Script file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write answers here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write a JSON run summary
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Generate a reproducible random script
    Gen {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 100)]
        nodes: usize,
        #[arg(long, default_value_t = 400)]
        edges: usize,
        #[arg(long, default_value_t = 1000)]
        commands: usize,
        #[arg(long, default_value_t = 100)]
        max_weight: u32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

/// JSON view of one `run`.
#[derive(Debug, Serialize)]
struct RunSummary {
    input: String,
    source: usize,
    commands: usize,
    answers: Vec<i64>,
    recomputes: u64,
    edges_created: usize,
    edges_alive: usize,
}

impl RunSummary {
    fn new(input: String, script: &Script, t: &Transcript) -> Self {
        Self {
            input,
            source: script.source.0,
            commands: script.commands.len(),
            answers: t.answers.iter().map(answer_code).collect(),
            recomputes: t.recomputes,
            edges_created: t.edges_created,
            edges_alive: t.edges_alive,
        }
    }
}

fn answer_code(a: &Answer) -> i64 {
    match *a {
        Answer::Bottleneck(w) => i64::from(w),
        Answer::Unreachable => -1,
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Run {
            input,
            out,
            summary,
        } => run(input, out, summary),
        Action::Gen {
            seed,
            index,
            nodes,
            edges,
            commands,
            max_weight,
            out,
        } => {
            let cfg = WorkloadCfg {
                nodes,
                initial_edges: edges,
                commands,
                max_weight,
                ..WorkloadCfg::default()
            };
            generate(cfg, ReplayToken { seed, index }, &out)
        }
        Action::Report => report(),
    }
}

fn run(input: Option<PathBuf>, out: Option<PathBuf>, summary: Option<PathBuf>) -> Result<()> {
    let (name, text) = match &input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            ("<stdin>".to_string(), text)
        }
    };
    let (script, transcript) = execute(&name, &text)?;
    tracing::info!(
        input = %name,
        answers = transcript.answers.len(),
        recomputes = transcript.recomputes,
        "run"
    );

    let rendered = transcript.render();
    match &out {
        Some(path) => {
            write_file(path, rendered.as_bytes())?;
            write_sidecar(path, Provenance::for_run(&name, &script, &transcript))?;
        }
        None => print!("{rendered}"),
    }

    if let Some(path) = &summary {
        let doc = RunSummary::new(name.clone(), &script, &transcript);
        write_file(path, &serde_json::to_vec_pretty(&doc)?)?;
        write_sidecar(path, Provenance::for_run(&name, &script, &transcript))?;
    }
    Ok(())
}

/// Parse and run `text`; `name` only labels errors.
fn execute(name: &str, text: &str) -> Result<(Script, Transcript)> {
    let script = Script::parse(text).with_context(|| format!("parsing {name}"))?;
    let transcript = script.run();
    Ok((script, transcript))
}

fn generate(cfg: WorkloadCfg, tok: ReplayToken, out: &Path) -> Result<()> {
    tracing::info!(
        seed = tok.seed,
        index = tok.index,
        nodes = cfg.nodes,
        edges = cfg.initial_edges,
        commands = cfg.commands,
        out = %out.display(),
        "gen"
    );
    let script = draw_script(cfg, tok);
    write_file(out, script.render().as_bytes())?;
    let params = serde_json::json!({
        "seed": tok.seed,
        "index": tok.index,
        "nodes": cfg.nodes,
        "edges": cfg.initial_edges,
        "commands": cfg.commands,
        "max_weight": cfg.max_weight,
    });
    write_sidecar(out, Provenance::for_gen(&script, params))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "lexipath_version": lexipath::VERSION,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn execute_reports_parse_errors_with_input_name() {
        let err = execute("bad.txt", "3 0 1\n1\nFOO 1\n").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("parsing bad.txt: "), "{msg}");
        assert!(msg.contains("unknown command \"FOO\""), "{msg}");
    }

    #[test]
    fn run_writes_answers_summary_and_sidecars() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "4 1 1\n1 2 5\n3\nASK 4\nADD 2 4 10\nASK 4\n").unwrap();
        let out = dir.path().join("out/answers.txt");
        let summary = dir.path().join("out/summary.json");
        run(Some(input), Some(out.clone()), Some(summary.clone())).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "-1\n10\n");
        let side: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("out/answers.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(side["run"]["answers"], 2);
        assert_eq!(side["script"]["initial_edges"], 1);
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&summary).unwrap()).unwrap();
        assert_eq!(doc["answers"], serde_json::json!([-1, 10]));
        assert_eq!(doc["recomputes"], 2);
        assert_eq!(doc["edges_alive"], 2);
    }

    #[test]
    fn gen_output_runs_cleanly() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("script.txt");
        let cfg = WorkloadCfg {
            nodes: 10,
            initial_edges: 20,
            commands: 30,
            ..WorkloadCfg::default()
        };
        generate(cfg, ReplayToken { seed: 5, index: 1 }, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let (script, transcript) = execute("script.txt", &text).unwrap();
        assert_eq!(script.commands.len(), 30);
        let asks = script
            .commands
            .iter()
            .filter(|c| matches!(c, lexipath::api::Command::Ask(_)))
            .count();
        assert_eq!(transcript.answers.len(), asks);
        assert!(dir.path().join("script.provenance.json").exists());
    }
}
