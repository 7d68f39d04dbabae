use std::{
    fmt,
    io::{self, BufRead, BufReader, Read},
};

use lalrpop_util::{lalrpop_mod, lexer::Token};
use thiserror::Error;

use crate::graph::{GraphError, InterferenceGraph};

lalrpop_mod!(#[allow(unused_imports, clippy::all)] pub grammar, "/parser/grammar.rs");

type LalrpopError<'input> = lalrpop_util::ParseError<usize, Token<'input>, &'static str>;

/// One non-blank line of an edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    // `a`
    Vertex(String),
    // `a,b`
    Edge(String, String),
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("parse error: unexpected end of line. expected: `{0:?}`")]
    Eol(Vec<String>),
    #[error("parse error: extra token: `{0}`")]
    ExtraToken(String),
    #[error("parse error: unrecognized token: `{0}`, expected: `{1:?}`")]
    UnrecognizedToken(String, Vec<String>),
    #[error("invalid token")]
    InvalidToken,
    #[error("{0}")]
    User(&'static str),
    #[error(transparent)]
    Graph(#[from] GraphError<String>),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Error {
    fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    fn from_lalrpop(e: LalrpopError<'_>, line: usize) -> Self {
        match e {
            lalrpop_util::ParseError::ExtraToken {
                token: (loc, Token(_, s), _),
            } => Error::new(ErrorKind::ExtraToken(s.to_string()), line, loc),
            lalrpop_util::ParseError::InvalidToken { location } => {
                Error::new(ErrorKind::InvalidToken, line, location)
            }
            lalrpop_util::ParseError::UnrecognizedEOF { location, expected } => {
                Error::new(ErrorKind::Eol(expected), line, location)
            }
            lalrpop_util::ParseError::UnrecognizedToken {
                token: (loc, Token(_, s), _),
                expected,
            } => Error::new(
                ErrorKind::UnrecognizedToken(s.to_string(), expected),
                line,
                loc,
            ),
            lalrpop_util::ParseError::User { error } => {
                Error::new(ErrorKind::User(error), line, 0)
            }
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "line: {}, column: {}", self.line, self.column + 1)?;
        write!(f, "{}", self.kind)
    }
}

/// Parses an edge list, skipping blank lines.
/// Each entry is paired with its 1-based line number.
pub fn parse<R>(r: R) -> Result<Vec<(usize, Line)>, Error>
where
    R: Read,
{
    let parser = grammar::LineParser::new();
    let mut lines = Vec::new();

    for (i, text) in BufReader::new(r).lines().enumerate() {
        let no = i + 1;
        let text = text.map_err(|e| Error::new(e.into(), no, 0))?;
        if text.trim().is_empty() {
            continue;
        }

        let line = parser
            .parse(&text)
            .map_err(|e| Error::from_lalrpop(e, no))?;
        lines.push((no, line));
    }

    Ok(lines)
}

/// Builds a graph from an edge list.
///
/// Every label is registered as a vertex before any edge is added, so an edge
/// may name labels that never get a line of their own.
pub fn load<R>(r: R) -> Result<InterferenceGraph<String>, Error>
where
    R: Read,
{
    let lines = parse(r)?;
    let mut graph = InterferenceGraph::with_capacity(lines.len());

    for (_, line) in &lines {
        match line {
            Line::Vertex(v) => graph.add_vertex(v.clone()),
            Line::Edge(v, w) => {
                graph.add_vertex(v.clone());
                graph.add_vertex(w.clone());
            }
        }
    }

    for (no, line) in &lines {
        if let Line::Edge(v, w) = line {
            graph
                .add_edge(v, w)
                .map_err(|e| Error::new(e.into(), *no, 0))?;
        }
    }

    Ok(graph)
}
