use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<T: Debug> {
    #[error("unknown vertex {0:?}")]
    UnknownVertex(T),

    #[error("unknown edge {0:?} - {1:?}")]
    UnknownEdge(T, T),
}

/// Undirected simple graph addressed by vertex label.
///
/// Every mutation checks its preconditions before touching any state, so a
/// call that returns `Err` leaves the graph exactly as it was.
#[derive(Debug, Clone)]
pub struct InterferenceGraph<T> {
    vertices: HashSet<T>,
    adjacency: HashMap<T, HashSet<T>>,
    num_edges: usize,
}

impl<T> InterferenceGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    pub fn new() -> Self {
        InterferenceGraph {
            vertices: HashSet::new(),
            adjacency: HashMap::new(),
            num_edges: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InterferenceGraph {
            vertices: HashSet::with_capacity(capacity),
            adjacency: HashMap::with_capacity(capacity),
            num_edges: 0,
        }
    }

    /// Inserts `vertex`. Inserting a label that is already present does nothing.
    pub fn add_vertex(&mut self, vertex: T) {
        if self.vertices.contains(&vertex) {
            return;
        }
        self.adjacency.insert(vertex.clone(), HashSet::new());
        self.vertices.insert(vertex);
    }

    /// Links `v` and `w`. Both must already be vertices.
    /// Self edges and edges that already exist are ignored.
    pub fn add_edge(&mut self, v: &T, w: &T) -> Result<(), GraphError<T>> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;

        if v == w || self.adjacency[v].contains(w) {
            return Ok(());
        }

        self.link(v, w);
        self.link(w, v);
        self.num_edges += 1;
        Ok(())
    }

    /// Removes `vertex` along with every edge incident to it.
    pub fn remove_vertex(&mut self, vertex: &T) -> Result<(), GraphError<T>> {
        let neighbors = self
            .adjacency
            .remove(vertex)
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))?;
        self.vertices.remove(vertex);

        for neighbor in &neighbors {
            self.unlink(neighbor, vertex);
        }
        self.num_edges -= neighbors.len();
        Ok(())
    }

    pub fn remove_edge(&mut self, v: &T, w: &T) -> Result<(), GraphError<T>> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;

        if !self.adjacency[v].contains(w) {
            return Err(GraphError::UnknownEdge(v.clone(), w.clone()));
        }

        self.unlink(v, w);
        self.unlink(w, v);
        self.num_edges -= 1;
        Ok(())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &T> + '_ {
        self.vertices.iter()
    }

    /// Every undirected edge exactly once.
    pub fn edges(&self) -> Vec<(&T, &T)> {
        let mut visited: HashSet<&T> = HashSet::with_capacity(self.vertices.len());
        let mut edges = Vec::with_capacity(self.num_edges);

        for (v, adj) in &self.adjacency {
            for w in adj {
                if !visited.contains(w) {
                    edges.push((v, w));
                }
            }
            visited.insert(v);
        }

        edges
    }

    pub fn neighbors(&self, vertex: &T) -> Result<&HashSet<T>, GraphError<T>> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, vertex: &T) -> bool {
        self.vertices.contains(vertex)
    }

    pub fn interferes(&self, v: &T, w: &T) -> Result<bool, GraphError<T>> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;

        Ok(self.adjacency[v].contains(w))
    }

    pub fn degree(&self, vertex: &T) -> Result<usize, GraphError<T>> {
        self.neighbors(vertex).map(HashSet::len)
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.values().map(HashSet::len).max().unwrap_or(0)
    }

    fn check_vertex(&self, vertex: &T) -> Result<(), GraphError<T>> {
        if self.vertices.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex.clone()))
        }
    }

    // callers have already checked that `from` is a vertex.
    fn link(&mut self, from: &T, to: &T) {
        if let Some(adj) = self.adjacency.get_mut(from) {
            adj.insert(to.clone());
        }
    }

    fn unlink(&mut self, from: &T, to: &T) {
        if let Some(adj) = self.adjacency.get_mut(from) {
            adj.remove(to);
        }
    }
}

impl<T> Default for InterferenceGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for InterferenceGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for vertex in iter {
            self.add_vertex(vertex);
        }
    }
}

impl<T> FromIterator<T> for InterferenceGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut graph = InterferenceGraph::new();
        graph.extend(iter);
        graph
    }
}
