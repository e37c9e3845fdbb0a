//! Per-size benchmark inputs.
//!
//! Every graph and query target is built here, before any timing starts, and
//! is only read afterwards.

use tracing::{info, instrument};
use txdag_core::{
    Graph, SeedStream, Shape, ShapeParams, TargetSelector, VertexId, build_graph, rng_for,
};

use crate::config::SuiteConfig;

/// The three graphs measured at one size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSet {
    chain: Graph,
    dag: Graph,
    block_dag: Graph,
}

impl GraphSet {
    /// Builds every shape at `size`, each from its own construction stream.
    #[must_use]
    pub fn build(size: usize, params: &ShapeParams, graph_seed: Option<u64>) -> Self {
        let construct = |shape: Shape| {
            let mut rng = rng_for(graph_seed, SeedStream::Construction(shape), size);
            build_graph(shape, size, params, &mut rng)
        };
        Self {
            chain: construct(Shape::Chain),
            dag: construct(Shape::Dag),
            block_dag: construct(Shape::BlockDag),
        }
    }

    /// Graph for `shape`.
    #[must_use]
    pub const fn get(&self, shape: Shape) -> &Graph {
        match shape {
            Shape::Chain => &self.chain,
            Shape::Dag => &self.dag,
            Shape::BlockDag => &self.block_dag,
        }
    }
}

/// The four query targets used at one size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSet {
    latest: VertexId,
    middle: VertexId,
    near_genesis: VertexId,
    random: VertexId,
}

impl TargetSet {
    /// Selects every target for a graph of `vertex_count` vertices.
    ///
    /// Each selector draws from its own target stream, so the query seed
    /// never touches graph construction.
    #[must_use]
    pub fn build(vertex_count: usize, query_seed: Option<u64>) -> Self {
        let select = |selector: TargetSelector| {
            let mut rng = rng_for(query_seed, SeedStream::Target(selector), vertex_count);
            selector.select(vertex_count, &mut rng)
        };
        Self {
            latest: select(TargetSelector::Latest),
            middle: select(TargetSelector::Middle),
            near_genesis: select(TargetSelector::NearGenesis),
            random: select(TargetSelector::Random),
        }
    }

    /// Target chosen by `selector`.
    #[must_use]
    pub const fn get(&self, selector: TargetSelector) -> VertexId {
        match selector {
            TargetSelector::Latest => self.latest,
            TargetSelector::Middle => self.middle,
            TargetSelector::NearGenesis => self.near_genesis,
            TargetSelector::Random => self.random,
        }
    }
}

/// Graphs and targets shared by every job at one size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteInput {
    size: usize,
    graphs: GraphSet,
    targets: TargetSet,
}

impl SuiteInput {
    /// Builds the graphs and targets for `size`.
    ///
    /// # Examples
    /// ```
    /// use txdag_benches::setup::SuiteInput;
    /// use txdag_core::{Shape, ShapeParams, TargetSelector};
    ///
    /// let input = SuiteInput::build(6, &ShapeParams::default(), Some(1), Some(2));
    /// assert_eq!(input.label(), "6");
    /// assert_eq!(input.graph(Shape::Chain).vertex_count(), 6);
    /// assert_eq!(input.target(TargetSelector::Latest), 5);
    /// assert_eq!(input.target(TargetSelector::Middle), 2);
    /// ```
    #[must_use]
    pub fn build(
        size: usize,
        params: &ShapeParams,
        graph_seed: Option<u64>,
        query_seed: Option<u64>,
    ) -> Self {
        Self {
            size,
            graphs: GraphSet::build(size, params, graph_seed),
            targets: TargetSet::build(size, query_seed),
        }
    }

    /// Requested vertex count.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Label the harness reports this input under.
    #[must_use]
    pub fn label(&self) -> String {
        self.size.to_string()
    }

    /// Graph for `shape` at this size.
    #[must_use]
    pub const fn graph(&self, shape: Shape) -> &Graph {
        self.graphs.get(shape)
    }

    /// Target chosen by `selector` at this size.
    #[must_use]
    pub const fn target(&self, selector: TargetSelector) -> VertexId {
        self.targets.get(selector)
    }
}

/// Builds one [`SuiteInput`] per configured size, in configuration order.
#[instrument(skip(config), fields(sizes = config.sizes().len()))]
pub fn prepare_inputs(config: &SuiteConfig) -> Vec<SuiteInput> {
    config
        .sizes()
        .iter()
        .map(|&size| {
            let input = SuiteInput::build(
                size,
                config.shape_params(),
                config.graph_seed(),
                config.query_seed(),
            );
            info!(
                size,
                chain_edges = input.graph(Shape::Chain).edge_count(),
                dag_edges = input.graph(Shape::Dag).edge_count(),
                blockdag_edges = input.graph(Shape::BlockDag).edge_count(),
                "graphs ready"
            );
            input
        })
        .collect()
}
