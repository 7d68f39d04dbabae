use std::{fmt::Debug, hash::Hash};

use thiserror::Error;

use crate::{
    color::{Register, RegisterAssignment},
    graph::InterferenceGraph,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError<T: Debug> {
    #[error("no registers were assigned")]
    Empty,

    #[error("vertex {0:?} has no register")]
    Unassigned(T),

    #[error("register assigned to unknown vertex {0:?}")]
    UnknownVertex(T),

    #[error("vertex {0:?} uses register {1}, which is out of range")]
    OutOfRange(T, Register),

    #[error("interfering vertices {0:?} and {1:?} both use register {2}")]
    Conflict(T, T, Register),
}

/// Checks `assignment` against `graph` independently of how it was produced.
pub fn verify<T>(
    graph: &InterferenceGraph<T>,
    num_registers: Register,
    assignment: &RegisterAssignment<T>,
) -> Result<(), VerifyError<T>>
where
    T: Hash + Eq + Clone + Debug,
{
    if assignment.is_empty() && !graph.is_empty() {
        return Err(VerifyError::Empty);
    }

    for vertex in graph.vertices() {
        if !assignment.contains_key(vertex) {
            return Err(VerifyError::Unassigned(vertex.clone()));
        }
    }

    for (vertex, &register) in assignment {
        if !graph.contains(vertex) {
            return Err(VerifyError::UnknownVertex(vertex.clone()));
        }
        if !(1..=num_registers).contains(&register) {
            return Err(VerifyError::OutOfRange(vertex.clone(), register));
        }
    }

    for (v, w) in graph.edges() {
        if assignment[v] == assignment[w] {
            return Err(VerifyError::Conflict(v.clone(), w.clone(), assignment[v]));
        }
    }

    Ok(())
}

pub fn is_valid<T>(
    graph: &InterferenceGraph<T>,
    num_registers: Register,
    assignment: &RegisterAssignment<T>,
) -> bool
where
    T: Hash + Eq + Clone + Debug,
{
    verify(graph, num_registers, assignment).is_ok()
}
