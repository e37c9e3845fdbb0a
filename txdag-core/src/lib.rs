//! txdag core library.
//!
//! Builds synthetic transaction graphs shaped like a linear chain, a pure DAG,
//! or a block DAG, and answers whether a vertex can reach genesis. All
//! randomness flows through generators passed in by the caller, so seeded
//! runs are reproducible.

mod construct;
mod error;
mod graph;
mod invariants;
mod params;
mod query;
mod seed;
mod target;

pub use crate::{
    construct::{
        build_graph, create_block_dag, create_block_dag_from_blocks, create_chain,
        create_pure_dag,
    },
    error::{GraphError, GraphErrorCode},
    graph::{GENESIS, Graph, VertexId},
    invariants::{GraphInvariantViolation, check_graph, collect_violations},
    params::{BlockDagParams, DagParams, Shape, ShapeParams},
    query::{Reachability, locate_path_to_genesis, query_path_to_genesis},
    seed::{SeedStream, derive_seed, rng_for},
    target::{TargetSelector, latest, middle, near_genesis, random_target},
};
