pub mod color;
pub mod dot;
pub mod graph;
pub mod parser;
pub mod verify;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub use crate::{
    color::{assign_registers, Register, RegisterAssignment},
    graph::{GraphError, InterferenceGraph},
};

/// Reads the edge list at `path` into a graph.
pub fn load(path: impl AsRef<Path>) -> Result<InterferenceGraph<String>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parser::load(file)?)
}

/// Loads the graph at `path` and colors it with at most `num_registers` registers.
///
/// Only loading can fail. Running out of registers is reported through an
/// empty assignment.
pub fn assign_registers_from_path(
    path: impl AsRef<Path>,
    num_registers: Register,
) -> Result<RegisterAssignment<String>, Error> {
    let graph = load(path)?;
    Ok(assign_registers(&graph, num_registers))
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    ParseError(#[from] parser::Error),

    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
}
