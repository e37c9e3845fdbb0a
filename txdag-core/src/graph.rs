//! Adjacency-list representation of a transaction DAG.
//!
//! Vertices are dense indices starting at [`GENESIS`]. Each vertex stores the
//! older vertices it depends on; edges therefore point from newer to older
//! transactions.

use crate::error::GraphError;

/// Identifier of a vertex inside a [`Graph`].
pub type VertexId = usize;

/// The fixed root vertex every graph starts from.
pub const GENESIS: VertexId = 0;

/// A directed graph whose edges point from a vertex to its parents.
///
/// Graphs produced by the construction functions in this crate are acyclic,
/// connected to genesis, and never hold duplicate parents. Graphs assembled
/// through [`Graph::from_parent_lists`] only guarantee that every edge targets
/// an existing vertex.
///
/// # Examples
/// ```
/// use txdag_core::{GENESIS, Graph};
///
/// let graph = Graph::genesis_only();
/// assert_eq!(graph.vertex_count(), 1);
/// assert!(graph.parents(GENESIS).is_empty());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    parents: Vec<Vec<VertexId>>,
}

impl Graph {
    /// Returns a graph that contains only the genesis vertex.
    #[must_use]
    pub fn genesis_only() -> Self {
        Self {
            parents: vec![Vec::new()],
        }
    }

    pub(crate) fn with_capacity(vertex_count: usize) -> Self {
        let mut parents = Vec::with_capacity(vertex_count.max(1));
        parents.push(Vec::new());
        Self { parents }
    }

    /// Appends the next vertex with the given parents and returns its id.
    pub(crate) fn push_vertex(&mut self, parents: Vec<VertexId>) -> VertexId {
        let id = self.parents.len();
        self.parents.push(parents);
        id
    }

    /// Builds a graph from raw per-vertex parent lists.
    ///
    /// Index `i` of `parent_lists` holds the parents of vertex `i`. Edges may
    /// point anywhere inside the graph, so the result may be cyclic or contain
    /// vertices that cannot reach genesis.
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] when no vertices are supplied and
    /// [`GraphError::UnknownParent`] when an edge targets a missing vertex.
    ///
    /// # Examples
    /// ```
    /// use txdag_core::Graph;
    ///
    /// let graph = Graph::from_parent_lists(vec![vec![], vec![0], vec![]])
    ///     .expect("all parents exist");
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn from_parent_lists(parent_lists: Vec<Vec<VertexId>>) -> Result<Self, GraphError> {
        if parent_lists.is_empty() {
            return Err(GraphError::Empty);
        }
        let vertex_count = parent_lists.len();
        for (vertex, parents) in parent_lists.iter().enumerate() {
            if let Some(&parent) = parents.iter().find(|&&parent| parent >= vertex_count) {
                return Err(GraphError::UnknownParent {
                    vertex,
                    parent,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            parents: parent_lists,
        })
    }

    /// Number of vertices, genesis included.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.parents.len()
    }

    /// Total number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.parents.iter().map(Vec::len).sum()
    }

    /// Returns `true` when `vertex` belongs to this graph.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex < self.parents.len()
    }

    /// Parents of `vertex`, or an empty slice for unknown vertices.
    #[must_use]
    pub fn parents(&self, vertex: VertexId) -> &[VertexId] {
        self.parents.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Iterates over every `(child, parent)` edge in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .flat_map(|(child, parents)| parents.iter().map(move |&parent| (child, parent)))
    }

    /// Iterates over vertex identifiers in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..self.parents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parent_lists_rejects_dangling_parents() {
        let err = Graph::from_parent_lists(vec![vec![], vec![3]])
            .expect_err("parent 3 does not exist");
        assert_eq!(
            err,
            GraphError::UnknownParent {
                vertex: 1,
                parent: 3,
                vertex_count: 2,
            }
        );
    }

    #[test]
    fn from_parent_lists_rejects_empty_input() {
        assert_eq!(Graph::from_parent_lists(Vec::new()), Err(GraphError::Empty));
    }

    #[test]
    fn edges_are_listed_in_vertex_order() {
        let graph = Graph::from_parent_lists(vec![vec![], vec![0], vec![0, 1]])
            .expect("valid adjacency");
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(1, 0), (2, 0), (2, 1)]);
        assert!(graph.parents(7).is_empty());
        assert!(!graph.contains(3));
    }
}
