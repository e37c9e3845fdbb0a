//! Reachability queries towards genesis.

use crate::graph::{GENESIS, Graph, VertexId};

/// Outcome of a detailed reachability search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reachability {
    /// Genesis is reachable from the start vertex.
    Reachable,
    /// The start vertex is not part of the graph.
    UnknownVertex,
    /// The start vertex exists but no directed path leads to genesis.
    Disconnected,
}

impl Reachability {
    /// Returns `true` for [`Reachability::Reachable`].
    #[must_use]
    pub const fn is_reachable(self) -> bool {
        matches!(self, Self::Reachable)
    }
}

/// Returns `true` when a directed path leads from `start` to genesis.
///
/// Genesis trivially reaches itself. Vertices outside the graph return
/// `false`. Engine-built graphs always return `true` for their own vertices.
///
/// # Examples
/// ```
/// use txdag_core::{create_chain, query_path_to_genesis};
///
/// let graph = create_chain(5);
/// assert!(query_path_to_genesis(&graph, 4));
/// assert!(!query_path_to_genesis(&graph, 99));
/// ```
#[must_use]
pub fn query_path_to_genesis(graph: &Graph, start: VertexId) -> bool {
    locate_path_to_genesis(graph, start).is_reachable()
}

/// Runs the reachability search and reports why it failed, if it did.
///
/// # Examples
/// ```
/// use txdag_core::{Graph, Reachability, locate_path_to_genesis};
///
/// let graph = Graph::from_parent_lists(vec![vec![], vec![0], vec![]]).expect("valid");
/// assert_eq!(locate_path_to_genesis(&graph, 1), Reachability::Reachable);
/// assert_eq!(locate_path_to_genesis(&graph, 2), Reachability::Disconnected);
/// assert_eq!(locate_path_to_genesis(&graph, 3), Reachability::UnknownVertex);
/// ```
#[must_use]
pub fn locate_path_to_genesis(graph: &Graph, start: VertexId) -> Reachability {
    if start == GENESIS {
        return Reachability::Reachable;
    }
    if !graph.contains(start) {
        return Reachability::UnknownVertex;
    }

    let mut visited = vec![false; graph.vertex_count()];
    let mut stack = vec![start];
    if let Some(seen) = visited.get_mut(start) {
        *seen = true;
    }

    while let Some(vertex) = stack.pop() {
        for &parent in graph.parents(vertex) {
            if parent == GENESIS {
                return Reachability::Reachable;
            }
            match visited.get_mut(parent) {
                Some(seen) if !*seen => {
                    *seen = true;
                    stack.push(parent);
                }
                _ => {}
            }
        }
    }
    Reachability::Disconnected
}
