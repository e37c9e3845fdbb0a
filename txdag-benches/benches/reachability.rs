//! Reachability-to-genesis benchmarks.
//!
//! Times the query from four target positions on chain, pure DAG and block
//! DAG graphs at each size, then writes `reachability.vl.json` and
//! `reachability.csv` next to Criterion's own reports.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};

use txdag_benches::{
    CriterionHarness, HarnessSettings, SuiteConfig, SuiteError, SuiteReport, configure_criterion,
    run_suite,
};

/// Base seed for graph construction, so runs compare like with like.
const GRAPH_SEED: u64 = 42;

/// Base seed for the random query target.
const QUERY_SEED: u64 = 7;

/// Report destination when `TXDAG_BENCH_REPORT_DIR` is unset.
const REPORT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../target/txdag");

fn report_dir() -> PathBuf {
    std::env::var_os("TXDAG_BENCH_REPORT_DIR").map_or_else(|| PathBuf::from(REPORT_DIR), PathBuf::from)
}

fn bench_sizes() -> Result<Option<Vec<usize>>, SuiteError> {
    let Ok(raw) = std::env::var("TXDAG_BENCH_SIZES") else {
        return Ok(None);
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>().map_err(|err| SuiteError::InvalidConfig {
                reason: format!("TXDAG_BENCH_SIZES entry `{part}`: {err}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn is_discovery_mode() -> bool {
    std::env::args().any(|arg| arg == "--list" || arg == "--exact")
}

fn suite_config() -> Result<SuiteConfig, SuiteError> {
    let mut builder = SuiteConfig::builder()
        .with_output_dir(report_dir())
        .with_graph_seed(Some(GRAPH_SEED))
        .with_query_seed(Some(QUERY_SEED));
    if let Some(sizes) = bench_sizes()? {
        builder = builder.with_sizes(sizes);
    }
    builder.build()
}

fn suite_criterion() -> Criterion {
    let criterion_dir = report_dir().join("criterion");
    configure_criterion(HarnessSettings::default(), &criterion_dir)
}

fn reachability_impl(c: &mut Criterion) -> Result<Option<SuiteReport>, SuiteError> {
    if is_discovery_mode() {
        return Ok(None);
    }
    let config = suite_config()?;
    let mut harness = CriterionHarness::new(c, config.criterion_dir());
    run_suite(&config, &mut harness).map(Some)
}

fn reachability(c: &mut Criterion) {
    if let Err(err) = reachability_impl(c) {
        panic!("reachability benchmark suite failed: {err}");
    }
}

criterion_group! {
    name = benches;
    config = suite_criterion();
    targets = reachability
}
criterion_main!(benches);
