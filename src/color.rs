use std::{cmp::Reverse, collections::HashMap, fmt::Debug, hash::Hash};

use itertools::Itertools;
use tracing::{debug, error};

use crate::graph::{GraphError, InterferenceGraph};

pub type Register = u32;

/// Register for every vertex of the graph, or empty when the budget was not enough.
pub type RegisterAssignment<T> = HashMap<T, Register>;

type ColorClass<T> = Vec<T>;
type WorkList<T> = Vec<T>;

/// Colors `graph` with registers in `1..=num_registers`.
///
/// Each round seeds a new color class with the remaining vertex of highest
/// degree and packs every non-interfering vertex into it, scanning in
/// descending degree order. Ties are broken by label order so the result is
/// reproducible.
///
/// The result never uses more than `max_degree + 1` registers. When the budget
/// runs out with vertices left the returned map is empty; a partial assignment
/// is never returned. `graph` itself is left untouched.
pub fn assign_registers<T>(
    graph: &InterferenceGraph<T>,
    num_registers: Register,
) -> RegisterAssignment<T>
where
    T: Hash + Eq + Clone + Ord + Debug,
{
    match _main(graph, num_registers) {
        Ok(Some(assignment)) => {
            debug!(
                vertices = graph.num_vertices(),
                used = assignment.values().max().copied().unwrap_or(0),
                "allocation succeeded"
            );
            assignment
        }
        Ok(None) => {
            debug!(
                vertices = graph.num_vertices(),
                num_registers, "not enough registers"
            );
            RegisterAssignment::new()
        }
        Err(e) => {
            error!("allocation lost track of a vertex: {}", e);
            RegisterAssignment::new()
        }
    }
}

fn _main<T>(
    graph: &InterferenceGraph<T>,
    num_registers: Register,
) -> Result<Option<RegisterAssignment<T>>, GraphError<T>>
where
    T: Hash + Eq + Clone + Ord + Debug,
{
    let mut work = graph.clone();
    let mut assignment = RegisterAssignment::with_capacity(graph.num_vertices());

    for register in 1..=num_registers {
        if work.is_empty() {
            break;
        }

        let work_list = make_work_list(&work)?;
        let class = select_class(&work, work_list)?;

        debug!(
            register,
            size = class.len(),
            remaining = work.num_vertices() - class.len()
        );

        for vertex in class {
            work.remove_vertex(&vertex)?;
            assignment.insert(vertex, register);
        }
    }

    if work.is_empty() {
        Ok(Some(assignment))
    } else {
        Ok(None)
    }
}

/// Remaining vertices, highest current degree first.
fn make_work_list<T>(work: &InterferenceGraph<T>) -> Result<WorkList<T>, GraphError<T>>
where
    T: Hash + Eq + Clone + Ord + Debug,
{
    let degrees: Vec<(usize, &T)> = work
        .vertices()
        .map(|vertex| work.degree(vertex).map(|degree| (degree, vertex)))
        .collect::<Result<_, _>>()?;

    Ok(degrees
        .into_iter()
        .sorted_by_key(|&(degree, vertex)| (Reverse(degree), vertex))
        .map(|(_, vertex)| vertex.clone())
        .collect())
}

/// Seeds a class with the head of `work_list`, then adds every later vertex
/// that interferes with nothing already in the class.
fn select_class<T>(
    work: &InterferenceGraph<T>,
    work_list: WorkList<T>,
) -> Result<ColorClass<T>, GraphError<T>>
where
    T: Hash + Eq + Clone + Ord + Debug,
{
    let mut class = ColorClass::new();

    'next: for vertex in work_list {
        for member in &class {
            if work.interferes(member, &vertex)? {
                continue 'next;
            }
        }
        class.push(vertex);
    }

    Ok(class)
}
