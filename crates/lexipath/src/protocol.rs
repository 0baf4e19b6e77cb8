//! Line-oriented text protocol driving the engine.
//!
//! Format
//! ```text
//! N M S
//! u v w          (M initial edges)
//! Q
//! ADD u v w | REM u v w | ASK t      (Q commands)
//! ```
//! Tokens are whitespace-separated; line breaks carry no meaning. Output is one
//! line per `ASK`: the bottleneck, or `-1` when unreachable.
//!
//! Initial edges go straight into the store and the engine is `touch`ed once,
//! so loading `M` edges costs no intermediate state transitions.

use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use crate::cfg::MAX_NODE;
use crate::engine::LexiEngine;
use crate::graph::{EdgeKey, Graph, NodeId, Weight};

/// Parse failures, each pointing at a 1-based token position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("unexpected end of input at token {token}: expected {expected}")]
    UnexpectedEof { token: usize, expected: &'static str },

    #[error("token {token}: expected {expected}, found {text:?}")]
    BadInteger {
        token: usize,
        expected: &'static str,
        text: String,
    },

    #[error("token {token}: {expected} out of range: {value}")]
    OutOfRange {
        token: usize,
        expected: &'static str,
        value: i64,
    },

    #[error("token {token}: unknown command {word:?} (expected ADD, REM or ASK)")]
    UnknownCommand { token: usize, word: String },

    #[error("token {token}: unexpected trailing input {text:?}")]
    TrailingInput { token: usize, text: String },
}

/// One mutation or query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Add(EdgeKey),
    Remove(EdgeKey),
    Ask(NodeId),
}

impl Command {
    /// Apply to `engine`; queries yield an answer.
    pub fn apply(&self, engine: &mut LexiEngine) -> Option<Answer> {
        match *self {
            Command::Add(k) => {
                engine.add_edge(k.from, k.to, k.weight);
                None
            }
            Command::Remove(k) => {
                engine.remove_edge(k.from, k.to, k.weight);
                None
            }
            Command::Ask(t) => Some(engine.ask(t).into()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add(k) => write!(f, "ADD {} {} {}", k.from.0, k.to.0, k.weight),
            Command::Remove(k) => write!(f, "REM {} {} {}", k.from.0, k.to.0, k.weight),
            Command::Ask(t) => write!(f, "ASK {}", t.0),
        }
    }
}

/// Answer to one `ASK`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Bottleneck(Weight),
    Unreachable,
}

impl From<Option<Weight>> for Answer {
    fn from(value: Option<Weight>) -> Self {
        value.map_or(Answer::Unreachable, Answer::Bottleneck)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bottleneck(w) => write!(f, "{w}"),
            Answer::Unreachable => f.write_str("-1"),
        }
    }
}

/// A parsed protocol input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    /// Highest node index announced by the header; the graph is pre-sized to it.
    pub nodes: usize,
    pub source: NodeId,
    pub edges: Vec<EdgeKey>,
    pub commands: Vec<Command>,
}

/// Result of running a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    pub answers: Vec<Answer>,
    pub recomputes: u64,
    pub edges_created: usize,
    pub edges_alive: usize,
}

impl Transcript {
    /// One line per answer, each newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for a in &self.answers {
            out.push_str(&a.to_string());
            out.push('\n');
        }
        out
    }
}

impl Script {
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let mut tok = Tokens::new(input);
        let nodes = tok.node("node count N")?.0;
        let m = tok.count("edge count M")?;
        let source = tok.node("source node S")?;
        let mut edges = Vec::with_capacity(m.min(1 << 20));
        for _ in 0..m {
            edges.push(tok.edge()?);
        }
        let q = tok.count("command count Q")?;
        let mut commands = Vec::with_capacity(q.min(1 << 20));
        for _ in 0..q {
            commands.push(tok.command()?);
        }
        if let Some(text) = tok.next_raw() {
            return Err(ProtocolError::TrailingInput {
                token: tok.pos,
                text: text.to_string(),
            });
        }
        Ok(Self {
            nodes,
            source,
            edges,
            commands,
        })
    }

    /// Build a fresh engine, load the initial edges, and run every command.
    pub fn run(&self) -> Transcript {
        let mut engine = self.load();
        let answers = self
            .commands
            .iter()
            .filter_map(|c| c.apply(&mut engine))
            .collect();
        Transcript {
            answers,
            recomputes: engine.recompute_count(),
            edges_created: engine.graph().edge_count(),
            edges_alive: engine.graph().alive_edge_count(),
        }
    }

    /// Engine holding the initial graph, ready for commands.
    pub fn load(&self) -> LexiEngine {
        let mut engine = LexiEngine::from_graph(Graph::with_nodes(self.nodes), self.source);
        let g = engine.graph_mut();
        for k in &self.edges {
            g.add_edge(k.from, k.to, k.weight);
        }
        engine.touch();
        engine
    }

    /// Serialize back to protocol text.
    pub fn render(&self) -> String {
        let mut out = format!("{} {} {}\n", self.nodes, self.edges.len(), self.source.0);
        for k in &self.edges {
            out.push_str(&format!("{} {} {}\n", k.from.0, k.to.0, k.weight));
        }
        out.push_str(&format!("{}\n", self.commands.len()));
        for c in &self.commands {
            out.push_str(&c.to_string());
            out.push('\n');
        }
        out
    }
}

impl FromStr for Script {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whitespace tokenizer tracking the 1-based position of the last token.
struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace(),
            pos: 0,
        }
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        let t = self.iter.next()?;
        self.pos += 1;
        Some(t)
    }

    fn expect(&mut self, expected: &'static str) -> Result<&'a str, ProtocolError> {
        self.next_raw().ok_or(ProtocolError::UnexpectedEof {
            token: self.pos + 1,
            expected,
        })
    }

    fn int(&mut self, expected: &'static str) -> Result<i64, ProtocolError> {
        let text = self.expect(expected)?;
        text.parse::<i64>().map_err(|_| ProtocolError::BadInteger {
            token: self.pos,
            expected,
            text: text.to_string(),
        })
    }

    fn count(&mut self, expected: &'static str) -> Result<usize, ProtocolError> {
        let v = self.int(expected)?;
        usize::try_from(v).map_err(|_| ProtocolError::OutOfRange {
            token: self.pos,
            expected,
            value: v,
        })
    }

    fn node(&mut self, expected: &'static str) -> Result<NodeId, ProtocolError> {
        let v = self.int(expected)?;
        match usize::try_from(v) {
            Ok(i) if i <= MAX_NODE => Ok(NodeId(i)),
            _ => Err(ProtocolError::OutOfRange {
                token: self.pos,
                expected,
                value: v,
            }),
        }
    }

    fn weight(&mut self) -> Result<Weight, ProtocolError> {
        let expected = "edge weight";
        let v = self.int(expected)?;
        Weight::try_from(v).map_err(|_| ProtocolError::OutOfRange {
            token: self.pos,
            expected,
            value: v,
        })
    }

    fn edge(&mut self) -> Result<EdgeKey, ProtocolError> {
        let from = self.node("edge source u")?;
        let to = self.node("edge target v")?;
        let weight = self.weight()?;
        Ok(EdgeKey::new(from, to, weight))
    }

    fn command(&mut self) -> Result<Command, ProtocolError> {
        let word = self.expect("command")?;
        match word {
            "ADD" => self.edge().map(Command::Add),
            "REM" => self.edge().map(Command::Remove),
            "ASK" => self.node("query node t").map(Command::Ask),
            _ => Err(ProtocolError::UnknownCommand {
                token: self.pos,
                word: word.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "\
5 5 1
1 2 3
1 3 5
2 4 4
3 4 4
4 5 6
6
ASK 5
ADD 1 5 100
ASK 5
REM 4 5 6
ASK 5
ADD 3 5 7
";

    #[test]
    fn parses_header_edges_and_commands() {
        let s = Script::parse(REFERENCE).unwrap();
        assert_eq!(s.nodes, 5);
        assert_eq!(s.source, NodeId(1));
        assert_eq!(s.edges.len(), 5);
        assert_eq!(s.commands[0], Command::Ask(NodeId(5)));
        assert_eq!(
            s.commands[1],
            Command::Add(EdgeKey::new(NodeId(1), NodeId(5), 100))
        );
        assert_eq!(
            s.commands[3],
            Command::Remove(EdgeKey::new(NodeId(4), NodeId(5), 6))
        );
    }

    #[test]
    fn run_renders_minus_one_for_unreachable() {
        let s: Script = "3 1 1\n1 2 5\n2\nASK 3\nASK 2\n".parse().unwrap();
        let t = s.run();
        assert_eq!(t.answers, vec![Answer::Unreachable, Answer::Bottleneck(5)]);
        assert_eq!(t.render(), "-1\n5\n");
        assert_eq!(t.recomputes, 1);
    }

    #[test]
    fn render_round_trips_through_parse() {
        let s = Script::parse(REFERENCE).unwrap();
        assert_eq!(Script::parse(&s.render()).unwrap(), s);
    }

    #[test]
    fn line_breaks_are_not_significant() {
        let a = Script::parse("2 1 1 1 2 3 1 ASK 2").unwrap();
        let b = Script::parse("2 1 1\n1 2 3\n1\nASK 2\n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reports_truncated_input() {
        let err = Script::parse("3 2 1\n1 2 3\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnexpectedEof {
                token: 7,
                expected: "edge source u"
            }
        );
    }

    #[test]
    fn rejects_negative_node_and_weight() {
        let err = Script::parse("3 0 1\n1\nASK -2\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::OutOfRange {
                token: 6,
                value: -2,
                ..
            }
        ));
        let err = Script::parse("3 1 1\n1 2 -4\n0\n").unwrap_err();
        assert!(matches!(err, ProtocolError::OutOfRange { value: -4, .. }));
    }

    #[test]
    fn rejects_node_indices_beyond_max_node() {
        let err = Script::parse("1 0 1\n1\nASK 9223372036854775807\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::OutOfRange {
                token: 6,
                expected: "query node t",
                value: i64::MAX,
            }
        );
        let err = Script::parse("9223372036854775807 0 1\n0\n").unwrap_err();
        assert!(matches!(err, ProtocolError::OutOfRange { token: 1, .. }));
        let too_far = MAX_NODE as i64 + 1;
        let err = Script::parse(&format!("3 1 1\n1 {too_far} 2\n0\n")).unwrap_err();
        assert!(matches!(err, ProtocolError::OutOfRange { token: 5, value, .. } if value == too_far));
        // The bound itself still parses; running it would allocate every slot.
        let s = Script::parse(&format!("3 0 1\n1\nASK {MAX_NODE}\n")).unwrap();
        assert_eq!(s.commands, vec![Command::Ask(NodeId(MAX_NODE))]);
    }

    #[test]
    fn rejects_unknown_command_and_garbage() {
        let err = Script::parse("3 0 1\n1\nDEL 1 2 3\n").unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCommand { token: 5, .. }));
        let err = Script::parse("3 0 x\n0\n").unwrap_err();
        assert!(matches!(err, ProtocolError::BadInteger { token: 3, .. }));
        let err = Script::parse("3 0 1\n0\nASK\n").unwrap_err();
        assert!(matches!(err, ProtocolError::TrailingInput { token: 5, .. }));
    }

    #[test]
    fn error_messages_name_the_token() {
        let err = Script::parse("3 0 1\n1\nDEL 1 2 3\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "token 5: unknown command \"DEL\" (expected ADD, REM or ASK)"
        );
    }
}
