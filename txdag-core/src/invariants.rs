//! Structural invariant checks for transaction graphs.
//!
//! Engine-built graphs must satisfy every check here. The checker exists so
//! tests and the CLI can confirm that without re-implementing traversal logic,
//! and so foreign graphs can be diagnosed precisely.

use std::collections::VecDeque;

use thiserror::Error;

use crate::graph::{GENESIS, Graph, VertexId};

/// Reports a structural invariant violation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GraphInvariantViolation {
    /// Genesis must not depend on anything.
    #[error("genesis has {count} outgoing edge(s)")]
    GenesisHasParents {
        /// Number of edges leaving genesis.
        count: usize,
    },
    /// A non-genesis vertex has no parent.
    #[error("vertex {vertex} has no parents")]
    Orphan {
        /// Vertex without outgoing edges.
        vertex: VertexId,
    },
    /// An edge points at a vertex that is not strictly older.
    #[error("edge {vertex}->{parent} does not point to an older vertex")]
    ForwardEdge {
        /// Source of the edge.
        vertex: VertexId,
        /// Target of the edge.
        parent: VertexId,
    },
    /// A vertex lists the same parent twice.
    #[error("vertex {vertex} lists parent {parent} more than once")]
    DuplicateParent {
        /// Vertex with the repeated edge.
        vertex: VertexId,
        /// Parent that appears more than once.
        parent: VertexId,
    },
    /// A vertex has no directed path to genesis.
    #[error("vertex {vertex} cannot reach genesis")]
    Unreachable {
        /// Vertex cut off from genesis.
        vertex: VertexId,
    },
}

enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<GraphInvariantViolation>),
}

impl EvaluationMode<'_> {
    fn record(&mut self, violation: GraphInvariantViolation) -> Result<(), GraphInvariantViolation> {
        match self {
            Self::FailFast => Err(violation),
            Self::Collect(sink) => {
                sink.push(violation);
                Ok(())
            }
        }
    }
}

/// Runs every check and returns the first violation encountered.
///
/// # Errors
/// Returns the first [`GraphInvariantViolation`] found.
///
/// # Examples
/// ```
/// use txdag_core::{check_graph, create_chain};
///
/// assert!(check_graph(&create_chain(100)).is_ok());
/// ```
pub fn check_graph(graph: &Graph) -> Result<(), GraphInvariantViolation> {
    evaluate(graph, &mut EvaluationMode::FailFast)
}

/// Runs every check and returns all violations found.
///
/// # Examples
/// ```
/// use txdag_core::{Graph, GraphInvariantViolation, collect_violations};
///
/// let graph = Graph::from_parent_lists(vec![vec![], vec![0], vec![]]).expect("valid");
/// assert_eq!(
///     collect_violations(&graph),
///     vec![
///         GraphInvariantViolation::Orphan { vertex: 2 },
///         GraphInvariantViolation::Unreachable { vertex: 2 },
///     ],
/// );
/// ```
#[must_use]
pub fn collect_violations(graph: &Graph) -> Vec<GraphInvariantViolation> {
    let mut violations = Vec::new();
    if let Err(violation) = evaluate(graph, &mut EvaluationMode::Collect(&mut violations)) {
        violations.push(violation);
    }
    violations
}

fn evaluate(graph: &Graph, mode: &mut EvaluationMode<'_>) -> Result<(), GraphInvariantViolation> {
    check_genesis(graph, mode)?;
    check_edges(graph, mode)?;
    check_reachability(graph, mode)
}

fn check_genesis(graph: &Graph, mode: &mut EvaluationMode<'_>) -> Result<(), GraphInvariantViolation> {
    let count = graph.parents(GENESIS).len();
    if count > 0 {
        mode.record(GraphInvariantViolation::GenesisHasParents { count })?;
    }
    Ok(())
}

fn check_edges(graph: &Graph, mode: &mut EvaluationMode<'_>) -> Result<(), GraphInvariantViolation> {
    for vertex in graph.vertices().skip(1) {
        let parents = graph.parents(vertex);
        if parents.is_empty() {
            mode.record(GraphInvariantViolation::Orphan { vertex })?;
        }
        for (position, &parent) in parents.iter().enumerate() {
            if parent >= vertex {
                mode.record(GraphInvariantViolation::ForwardEdge { vertex, parent })?;
            }
            if parents.iter().take(position).any(|&earlier| earlier == parent) {
                mode.record(GraphInvariantViolation::DuplicateParent { vertex, parent })?;
            }
        }
    }
    Ok(())
}

/// Walks the reversed edges outward from genesis; anything left unvisited has
/// no directed path to genesis. Works for cyclic input too.
fn check_reachability(
    graph: &Graph,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    let mut children: Vec<Vec<VertexId>> = vec![Vec::new(); graph.vertex_count()];
    for (child, parent) in graph.edges() {
        if let Some(slot) = children.get_mut(parent) {
            slot.push(child);
        }
    }

    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::from([GENESIS]);
    if let Some(genesis) = visited.get_mut(GENESIS) {
        *genesis = true;
    }
    while let Some(vertex) = queue.pop_front() {
        for &child in children.get(vertex).map_or(&[][..], Vec::as_slice) {
            if let Some(seen) = visited.get_mut(child) {
                if !*seen {
                    *seen = true;
                    queue.push_back(child);
                }
            }
        }
    }

    for (vertex, seen) in visited.iter().enumerate() {
        if !seen {
            mode.record(GraphInvariantViolation::Unreachable { vertex })?;
        }
    }
    Ok(())
}
