//! Scenario tests for graph construction and reachability.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use txdag_core::{
    BlockDagParams, DagParams, GENESIS, Graph, SeedStream, Shape, ShapeParams, TargetSelector,
    build_graph, check_graph, create_block_dag, create_block_dag_from_blocks, create_chain,
    create_pure_dag, query_path_to_genesis, rng_for,
};

use txdag_test_support::tracing::RecordingLayer;

#[fixture]
fn shape_params() -> ShapeParams {
    ShapeParams {
        dag: DagParams { avg_parents: 3 },
        block_dag: BlockDagParams {
            tx_per_block: 8,
            k_internal: 2,
            k_external: 3,
        },
    }
}

fn edge_list(graph: &Graph) -> Vec<(usize, usize)> {
    graph.edges().collect()
}

#[rstest]
fn chain_of_five_links_each_vertex_to_its_predecessor() {
    let graph = create_chain(5);
    assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(edge_list(&graph), vec![(1, 0), (2, 1), (3, 2), (4, 3)]);
    assert!(query_path_to_genesis(&graph, 4));
    assert!(!query_path_to_genesis(&graph, 99));
}

#[rstest]
fn degenerate_block_dag_picks_exactly_one_earlier_block() {
    let params = BlockDagParams {
        tx_per_block: 1,
        k_internal: 0,
        k_external: 1,
    };
    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = create_block_dag_from_blocks(4, &params, &mut rng);
        assert_eq!(graph.vertex_count(), 4);
        let parents = graph.parents(3);
        assert_eq!(parents.len(), 1, "seed {seed}");
        assert!(parents.iter().all(|p| (0..3).contains(p)), "seed {seed}");
        assert!(query_path_to_genesis(&graph, 3));
    }
}

#[rstest]
fn block_dag_first_vertex_of_first_block_is_genesis() {
    // Block 0 offers no external candidates; vertex 1 must still link to 0.
    let params = BlockDagParams {
        tx_per_block: 4,
        k_internal: 0,
        k_external: 5,
    };
    let mut rng = SmallRng::seed_from_u64(17);
    let graph = create_block_dag(4, &params, &mut rng);
    assert!(graph.parents(GENESIS).is_empty());
    assert_eq!(edge_list(&graph), vec![(1, 0), (2, 1), (3, 2)]);
}

#[rstest]
#[case::chain(Shape::Chain)]
#[case::dag(Shape::Dag)]
#[case::blockdag(Shape::BlockDag)]
fn every_vertex_reaches_genesis(#[case] shape: Shape, shape_params: ShapeParams) {
    let mut rng = SmallRng::seed_from_u64(2024);
    let graph = build_graph(shape, 500, &shape_params, &mut rng);
    check_graph(&graph).expect("engine graphs satisfy every invariant");
    for vertex in graph.vertices() {
        assert!(query_path_to_genesis(&graph, vertex), "{shape}: {vertex}");
    }
}

#[rstest]
#[case::dag(Shape::Dag)]
#[case::blockdag(Shape::BlockDag)]
fn identical_seeds_produce_identical_graphs(#[case] shape: Shape, shape_params: ShapeParams) {
    let stream = SeedStream::Construction(shape);
    let left = build_graph(shape, 300, &shape_params, &mut rng_for(Some(5), stream, 300));
    let right = build_graph(shape, 300, &shape_params, &mut rng_for(Some(5), stream, 300));
    assert_eq!(left, right);
}

#[rstest]
#[case::dag(Shape::Dag)]
#[case::blockdag(Shape::BlockDag)]
fn different_seeds_produce_different_graphs(#[case] shape: Shape, shape_params: ShapeParams) {
    let stream = SeedStream::Construction(shape);
    let left = build_graph(shape, 300, &shape_params, &mut rng_for(Some(5), stream, 300));
    let right = build_graph(shape, 300, &shape_params, &mut rng_for(Some(6), stream, 300));
    assert_ne!(edge_list(&left), edge_list(&right));
}

#[rstest]
fn target_selection_does_not_disturb_construction(shape_params: ShapeParams) {
    let stream = SeedStream::Construction(Shape::Dag);
    let baseline = build_graph(Shape::Dag, 200, &shape_params, &mut rng_for(Some(1), stream, 200));
    for query_seed in [10, 20, 30] {
        let mut target_rng = rng_for(
            Some(query_seed),
            SeedStream::Target(TargetSelector::Random),
            200,
        );
        let _target = TargetSelector::Random.select(200, &mut target_rng);
        let rebuilt = build_graph(Shape::Dag, 200, &shape_params, &mut rng_for(Some(1), stream, 200));
        assert_eq!(baseline, rebuilt);
    }
}

#[rstest]
fn pure_dag_respects_requested_parent_count() {
    let mut rng = SmallRng::seed_from_u64(8);
    let graph = create_pure_dag(64, &DagParams { avg_parents: 4 }, &mut rng);
    for vertex in 1..64 {
        assert_eq!(graph.parents(vertex).len(), vertex.min(4), "vertex {vertex}");
    }
}

#[rstest]
fn construction_emits_debug_spans() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry()
        .with(layer.clone())
        .with(tracing_subscriber::filter::LevelFilter::from_level(Level::DEBUG));
    tracing::subscriber::with_default(subscriber, || {
        let _graph = create_chain(3);
    });
    let span = layer
        .span_named("create_chain")
        .expect("create_chain must be instrumented");
    assert_eq!(span.field("vertex_count"), Some("3"));
}
