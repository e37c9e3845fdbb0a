//! Graph construction policies.
//!
//! Every construction walks vertices `1..n` once and only ever selects parents
//! with a lower index, so the resulting graphs are acyclic by construction.
//! Randomised policies draw from the generator passed in by the caller; the
//! same generator state always yields the same graph.

use rand::{Rng, seq::index};
use tracing::instrument;

use crate::{
    graph::{GENESIS, Graph, VertexId},
    params::{BlockDagParams, DagParams, Shape, ShapeParams},
};

/// Builds a linear chain in which vertex `i` points at `i - 1`.
///
/// Sizes below two yield a genesis-only graph.
///
/// # Examples
/// ```
/// use txdag_core::create_chain;
///
/// let graph = create_chain(5);
/// let edges: Vec<_> = graph.edges().collect();
/// assert_eq!(edges, vec![(1, 0), (2, 1), (3, 2), (4, 3)]);
/// ```
#[must_use]
#[instrument(level = "debug")]
pub fn create_chain(vertex_count: usize) -> Graph {
    let mut graph = Graph::with_capacity(vertex_count);
    for vertex in 1..vertex_count {
        graph.push_vertex(vec![vertex - 1]);
    }
    graph
}

/// Builds a pure DAG where each vertex picks `min(avg_parents, i)` distinct
/// parents uniformly among all older vertices.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use txdag_core::{DagParams, create_pure_dag};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = create_pure_dag(10, &DagParams { avg_parents: 3 }, &mut rng);
/// assert_eq!(graph.vertex_count(), 10);
/// assert_eq!(graph.parents(1), &[0]);
/// assert_eq!(graph.parents(9).len(), 3);
/// ```
#[instrument(level = "debug", skip(rng))]
pub fn create_pure_dag<R: Rng + ?Sized>(
    vertex_count: usize,
    params: &DagParams,
    rng: &mut R,
) -> Graph {
    let wanted = params.effective_parents();
    let mut graph = Graph::with_capacity(vertex_count);
    for vertex in 1..vertex_count {
        let parents = sample_sorted(rng, 0, vertex, wanted);
        graph.push_vertex(parents);
    }
    graph
}

/// Builds a block DAG.
///
/// Vertices are grouped into blocks of `tx_per_block` consecutive indices.
/// Vertex `i` draws up to `k_internal` parents from earlier vertices of its
/// own block and up to `k_external` parents from all earlier blocks. When
/// both draws come back empty the vertex is linked to `i - 1`, which keeps
/// every vertex connected to genesis for any parameter combination.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use txdag_core::{BlockDagParams, create_block_dag};
///
/// let params = BlockDagParams { tx_per_block: 4, k_internal: 1, k_external: 2 };
/// let mut rng = SmallRng::seed_from_u64(11);
/// let graph = create_block_dag(12, &params, &mut rng);
/// // The first vertex of block 1 only sees block 0.
/// assert!(graph.parents(4).iter().all(|&p| p < 4));
/// ```
#[instrument(level = "debug", skip(rng))]
pub fn create_block_dag<R: Rng + ?Sized>(
    vertex_count: usize,
    params: &BlockDagParams,
    rng: &mut R,
) -> Graph {
    let block_len = params.block_len();
    let mut graph = Graph::with_capacity(vertex_count);
    for vertex in 1..vertex_count {
        let block_start = (vertex / block_len) * block_len;
        let mut parents = sample_sorted(rng, block_start, vertex, params.k_internal);
        parents.extend(sample_sorted(rng, 0, block_start, params.k_external));
        parents.sort_unstable();
        parents.dedup();
        if parents.is_empty() {
            parents.push(vertex.saturating_sub(1));
        }
        graph.push_vertex(parents);
    }
    graph
}

/// Builds a block DAG made of `num_blocks` full blocks.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use txdag_core::{BlockDagParams, create_block_dag_from_blocks};
///
/// let params = BlockDagParams { tx_per_block: 1, k_internal: 0, k_external: 1 };
/// let mut rng = SmallRng::seed_from_u64(3);
/// let graph = create_block_dag_from_blocks(4, &params, &mut rng);
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.parents(3).len(), 1);
/// ```
pub fn create_block_dag_from_blocks<R: Rng + ?Sized>(
    num_blocks: usize,
    params: &BlockDagParams,
    rng: &mut R,
) -> Graph {
    create_block_dag(params.vertex_count_for_blocks(num_blocks), params, rng)
}

/// Builds a graph of the requested `shape`.
pub fn build_graph<R: Rng + ?Sized>(
    shape: Shape,
    vertex_count: usize,
    params: &ShapeParams,
    rng: &mut R,
) -> Graph {
    match shape {
        Shape::Chain => create_chain(vertex_count),
        Shape::Dag => create_pure_dag(vertex_count, &params.dag, rng),
        Shape::BlockDag => create_block_dag(vertex_count, &params.block_dag, rng),
    }
}

/// Draws up to `wanted` distinct vertices from `start..end` and returns them
/// in ascending order.
fn sample_sorted<R: Rng + ?Sized>(
    rng: &mut R,
    start: VertexId,
    end: VertexId,
    wanted: usize,
) -> Vec<VertexId> {
    let available = end.saturating_sub(start);
    let amount = wanted.min(available);
    if amount == 0 {
        return Vec::new();
    }
    let mut picked: Vec<VertexId> = index::sample(rng, available, amount)
        .into_iter()
        .map(|offset| start + offset)
        .collect();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    fn degenerate_sizes_yield_genesis_only(#[case] size: usize) {
        let params = ShapeParams::default();
        for shape in Shape::ALL {
            let mut rng = SmallRng::seed_from_u64(1);
            let graph = build_graph(shape, size, &params, &mut rng);
            assert_eq!(graph, Graph::genesis_only(), "{shape} at size {size}");
        }
    }

    #[test]
    fn sample_sorted_clamps_to_available_candidates() {
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(sample_sorted(&mut rng, 3, 6, 10), vec![3, 4, 5]);
        assert!(sample_sorted(&mut rng, 4, 4, 2).is_empty());
        assert!(sample_sorted(&mut rng, 0, 9, 0).is_empty());
    }

    #[test]
    fn pure_dag_with_zero_parents_still_links_every_vertex() {
        let mut rng = SmallRng::seed_from_u64(9);
        let graph = create_pure_dag(20, &DagParams { avg_parents: 0 }, &mut rng);
        assert!(graph.parents(GENESIS).is_empty());
        assert!((1..20).all(|v| graph.parents(v).len() == 1));
    }

    #[test]
    fn block_dag_without_any_draws_falls_back_to_predecessor() {
        let params = BlockDagParams {
            tx_per_block: 5,
            k_internal: 0,
            k_external: 0,
        };
        let mut rng = SmallRng::seed_from_u64(2);
        let graph = create_block_dag(7, &params, &mut rng);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(1, 0), (2, 1), (3, 2), (4, 3), (5, 4), (6, 5)]);
    }

    #[test]
    fn block_dag_separates_internal_and_external_candidates() {
        let params = BlockDagParams {
            tx_per_block: 4,
            k_internal: 4,
            k_external: 8,
        };
        let mut rng = SmallRng::seed_from_u64(13);
        let graph = create_block_dag(10, &params, &mut rng);
        // Pools are small enough to be taken whole.
        assert_eq!(graph.parents(1), &[0]);
        assert_eq!(graph.parents(4), &[0, 1, 2, 3]);
        assert_eq!(graph.parents(6), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(graph.parents(9), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
