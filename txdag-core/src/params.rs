//! Shape identifiers and the structural parameters each construction uses.

use std::fmt;

/// Construction policy used to build a graph.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Shape {
    /// Linear chain: every vertex points at its predecessor.
    Chain,
    /// Pure DAG: each vertex picks random parents among all older vertices.
    Dag,
    /// Block DAG: parents are drawn from the current block and earlier blocks.
    BlockDag,
}

impl Shape {
    /// Every shape in canonical order.
    pub const ALL: [Self; 3] = [Self::Chain, Self::Dag, Self::BlockDag];

    /// Returns the stable lowercase identifier used in job names and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Dag => "dag",
            Self::BlockDag => "blockdag",
        }
    }

    /// Parses the identifier returned by [`Shape::as_str`].
    ///
    /// # Examples
    /// ```
    /// use txdag_core::Shape;
    ///
    /// assert_eq!(Shape::from_name("blockdag"), Some(Shape::BlockDag));
    /// assert_eq!(Shape::from_name("tree"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.as_str() == name)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for the pure DAG construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DagParams {
    /// Number of distinct parents each vertex selects. Values below one are
    /// treated as one.
    pub avg_parents: usize,
}

impl DagParams {
    pub(crate) fn effective_parents(self) -> usize {
        self.avg_parents.max(1)
    }
}

impl Default for DagParams {
    fn default() -> Self {
        Self { avg_parents: 2 }
    }
}

/// Parameters for the block DAG construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockDagParams {
    /// Number of consecutive vertices grouped into one block.
    pub tx_per_block: usize,
    /// Maximum parents drawn from earlier vertices of the same block.
    pub k_internal: usize,
    /// Maximum parents drawn from earlier blocks.
    pub k_external: usize,
}

impl BlockDagParams {
    /// Block size used for partitioning; a zero block size behaves as one.
    #[must_use]
    pub fn block_len(&self) -> usize {
        self.tx_per_block.max(1)
    }

    /// Total vertex count for `num_blocks` full blocks.
    #[must_use]
    pub fn vertex_count_for_blocks(&self, num_blocks: usize) -> usize {
        num_blocks.saturating_mul(self.block_len())
    }
}

impl Default for BlockDagParams {
    fn default() -> Self {
        Self {
            tx_per_block: 10,
            k_internal: 1,
            k_external: 2,
        }
    }
}

/// Structural parameters for every shape, bundled for suite setup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ShapeParams {
    /// Pure DAG parameters.
    pub dag: DagParams,
    /// Block DAG parameters.
    pub block_dag: BlockDagParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::chain(Shape::Chain, "chain")]
    #[case::dag(Shape::Dag, "dag")]
    #[case::blockdag(Shape::BlockDag, "blockdag")]
    fn shape_names_round_trip(#[case] shape: Shape, #[case] name: &str) {
        assert_eq!(shape.as_str(), name);
        assert_eq!(Shape::from_name(name), Some(shape));
    }

    #[test]
    fn degenerate_parameters_are_clamped() {
        assert_eq!(DagParams { avg_parents: 0 }.effective_parents(), 1);
        let params = BlockDagParams {
            tx_per_block: 0,
            k_internal: 0,
            k_external: 1,
        };
        assert_eq!(params.block_len(), 1);
        assert_eq!(params.vertex_count_for_blocks(4), 4);
    }
}
