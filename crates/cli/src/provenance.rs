//! `<artifact>.provenance.json` sidecars for files written by `run` and `gen`.
//!
//! A sidecar records which build produced the artifact and the shape of the
//! script behind it, so an answers file can be matched to its input later.

use anyhow::{Context, Result};
use lexipath::api::{Answer, Command, Script, Transcript};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Shape of the script an artifact came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScriptShape {
    pub nodes: usize,
    pub source: usize,
    pub initial_edges: usize,
    pub adds: usize,
    pub removes: usize,
    pub asks: usize,
}

impl ScriptShape {
    pub fn of(script: &Script) -> Self {
        let mut shape = Self {
            nodes: script.nodes,
            source: script.source.0,
            initial_edges: script.edges.len(),
            adds: 0,
            removes: 0,
            asks: 0,
        };
        for c in &script.commands {
            match c {
                Command::Add(_) => shape.adds += 1,
                Command::Remove(_) => shape.removes += 1,
                Command::Ask(_) => shape.asks += 1,
            }
        }
        shape
    }
}

/// Outcome counters, present only for `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub answers: usize,
    pub unreachable: usize,
    pub recomputes: u64,
    pub edges_alive: usize,
}

impl RunCounts {
    pub fn of(t: &Transcript) -> Self {
        Self {
            answers: t.answers.len(),
            unreachable: t
                .answers
                .iter()
                .filter(|a| matches!(a, Answer::Unreachable))
                .count(),
            recomputes: t.recomputes,
            edges_alive: t.edges_alive,
        }
    }
}

/// Sidecar document.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub command: &'static str,
    pub code_rev: String,
    pub lexipath_version: &'static str,
    /// Script file name, or `<stdin>`; absent for generated scripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub script: ScriptShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunCounts>,
    /// Generator settings for `gen`, `null` otherwise.
    pub params: Value,
    pub artifact: String,
}

impl Provenance {
    pub fn for_run(input: &str, script: &Script, t: &Transcript) -> Self {
        Self::base("run", script, Some(input.to_string()), Some(RunCounts::of(t)), Value::Null)
    }

    pub fn for_gen(script: &Script, params: Value) -> Self {
        Self::base("gen", script, None, None, params)
    }

    fn base(
        command: &'static str,
        script: &Script,
        input: Option<String>,
        run: Option<RunCounts>,
        params: Value,
    ) -> Self {
        Self {
            command,
            code_rev: code_rev(),
            lexipath_version: lexipath::VERSION,
            input,
            script: ScriptShape::of(script),
            run,
            params,
            artifact: String::new(),
        }
    }
}

/// Write the sidecar next to `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, mut doc: Provenance) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    doc.artifact = artifact.display().to_string();
    let bytes = serde_json::to_vec_pretty(&doc)?;
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `dir/answers.txt` -> `dir/answers.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, else `"unknown"`.
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCRIPT: &str = "4 1 1\n1 2 5\n4\nASK 4\nADD 2 4 10\nREM 1 3 1\nASK 4\n";

    #[test]
    fn sidecar_path_swaps_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/answers.txt")),
            Path::new("/tmp/out/answers.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("script")),
            Path::new("script.provenance.json")
        );
    }

    #[test]
    fn shape_counts_each_command_kind() {
        let script = Script::parse(SCRIPT).unwrap();
        let shape = ScriptShape::of(&script);
        assert_eq!(
            shape,
            ScriptShape {
                nodes: 4,
                source: 1,
                initial_edges: 1,
                adds: 1,
                removes: 1,
                asks: 2,
            }
        );
    }

    #[test]
    fn run_sidecar_records_input_and_outcome() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("answers.txt");
        let script = Script::parse(SCRIPT).unwrap();
        let t = script.run();
        let path = write_sidecar(&artifact, Provenance::for_run("in.txt", &script, &t)).unwrap();

        let doc: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["command"], "run");
        assert_eq!(doc["input"], "in.txt");
        assert_eq!(doc["script"]["asks"], 2);
        assert_eq!(doc["run"]["answers"], 2);
        assert_eq!(doc["run"]["unreachable"], 1);
        assert_eq!(doc["run"]["recomputes"], 2);
        assert_eq!(doc["artifact"], artifact.display().to_string());
    }

    #[test]
    fn gen_sidecar_omits_run_fields() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("script.txt");
        let script = Script::parse(SCRIPT).unwrap();
        let params = serde_json::json!({ "seed": 3 });
        let path = write_sidecar(&artifact, Provenance::for_gen(&script, params)).unwrap();

        let doc: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["command"], "gen");
        assert_eq!(doc["params"]["seed"], 3);
        assert!(doc.get("input").is_none());
        assert!(doc.get("run").is_none());
    }
}
