//! Suite configuration.
//!
//! [`SuiteConfigBuilder`] collects the sizes, structural parameters, harness
//! knobs, output location and seeds for one suite run and validates them
//! before any graph is built.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    time::Duration,
};

use txdag_core::{BlockDagParams, DagParams, Shape, ShapeParams, TargetSelector};

use crate::error::SuiteError;

/// Graph sizes measured when none are requested explicitly.
pub const DEFAULT_SIZES: &[usize] = &[100, 1_000, 10_000];

/// Criterion refuses sample sizes below this value.
pub const MIN_SAMPLE_SIZE: usize = 10;

const DEFAULT_WARM_UP: Duration = Duration::from_millis(500);
const DEFAULT_MEASUREMENT: Duration = Duration::from_secs(1);
const DEFAULT_SAMPLE_SIZE: usize = 20;
/// Report directory used when none is requested explicitly.
pub const DEFAULT_OUTPUT_DIR: &str = "target/txdag";
const DEFAULT_BASENAME: &str = "reachability";

/// Timing knobs handed to the benchmark harness.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HarnessSettings {
    /// Warm-up time per benchmark.
    pub warm_up: Duration,
    /// Measurement time per benchmark.
    pub measurement: Duration,
    /// Number of samples collected per benchmark.
    pub sample_size: usize,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            warm_up: DEFAULT_WARM_UP,
            measurement: DEFAULT_MEASUREMENT,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Validated configuration for one suite run.
#[derive(Clone, Debug)]
pub struct SuiteConfig {
    sizes: Vec<usize>,
    shapes: Vec<Shape>,
    selectors: Vec<TargetSelector>,
    shape_params: ShapeParams,
    harness: HarnessSettings,
    output_dir: PathBuf,
    basename: String,
    graph_seed: Option<u64>,
    query_seed: Option<u64>,
}

impl SuiteConfig {
    /// Starts a builder populated with defaults.
    #[must_use]
    pub fn builder() -> SuiteConfigBuilder {
        SuiteConfigBuilder::default()
    }

    /// Graph sizes, in measurement order.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Shapes included in the job table.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Target selectors included in the job table.
    #[must_use]
    pub fn selectors(&self) -> &[TargetSelector] {
        &self.selectors
    }

    /// Structural parameters shared by every size.
    #[must_use]
    pub const fn shape_params(&self) -> &ShapeParams {
        &self.shape_params
    }

    /// Harness timing knobs.
    #[must_use]
    pub const fn harness(&self) -> HarnessSettings {
        self.harness
    }

    /// Directory receiving the chart specification and CSV report.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File stem shared by every report.
    #[must_use]
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Base seed for graph construction.
    #[must_use]
    pub const fn graph_seed(&self) -> Option<u64> {
        self.graph_seed
    }

    /// Base seed for query target selection.
    #[must_use]
    pub const fn query_seed(&self) -> Option<u64> {
        self.query_seed
    }

    /// Path of the chart specification written by the suite.
    #[must_use]
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.vl.json", self.basename))
    }

    /// Path of the CSV report written by the suite.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.basename))
    }

    /// Directory handed to Criterion for its own reports.
    #[must_use]
    pub fn criterion_dir(&self) -> PathBuf {
        self.output_dir.join("criterion")
    }
}

/// Configures and validates a [`SuiteConfig`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use txdag_benches::config::SuiteConfig;
///
/// let config = SuiteConfig::builder()
///     .with_sizes(vec![10, 100])
///     .with_warm_up(Duration::from_millis(50))
///     .with_graph_seed(Some(42))
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(config.sizes(), &[10, 100]);
/// assert_eq!(config.graph_seed(), Some(42));
/// assert!(config.chart_path().ends_with("reachability.vl.json"));
/// ```
#[derive(Clone, Debug)]
pub struct SuiteConfigBuilder {
    sizes: Vec<usize>,
    shapes: Vec<Shape>,
    selectors: Vec<TargetSelector>,
    dag: DagParams,
    block_dag: BlockDagParams,
    warm_up: Duration,
    measurement: Duration,
    sample_size: usize,
    output_dir: PathBuf,
    basename: String,
    graph_seed: Option<u64>,
    query_seed: Option<u64>,
}

impl Default for SuiteConfigBuilder {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            shapes: Shape::ALL.to_vec(),
            selectors: TargetSelector::ALL.to_vec(),
            dag: DagParams::default(),
            block_dag: BlockDagParams::default(),
            warm_up: DEFAULT_WARM_UP,
            measurement: DEFAULT_MEASUREMENT,
            sample_size: DEFAULT_SAMPLE_SIZE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            basename: DEFAULT_BASENAME.to_owned(),
            graph_seed: None,
            query_seed: None,
        }
    }
}

impl SuiteConfigBuilder {
    /// Overrides the graph sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Restricts the job table to `shapes`.
    #[must_use]
    pub fn with_shapes(mut self, shapes: Vec<Shape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Restricts the job table to `selectors`.
    #[must_use]
    pub fn with_selectors(mut self, selectors: Vec<TargetSelector>) -> Self {
        self.selectors = selectors;
        self
    }

    /// Overrides the pure DAG parameters.
    #[must_use]
    pub const fn with_dag_params(mut self, params: DagParams) -> Self {
        self.dag = params;
        self
    }

    /// Overrides the block DAG parameters.
    #[must_use]
    pub const fn with_block_dag_params(mut self, params: BlockDagParams) -> Self {
        self.block_dag = params;
        self
    }

    /// Overrides the harness warm-up time.
    #[must_use]
    pub const fn with_warm_up(mut self, warm_up: Duration) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Overrides the harness measurement time.
    #[must_use]
    pub const fn with_measurement(mut self, measurement: Duration) -> Self {
        self.measurement = measurement;
        self
    }

    /// Overrides the number of harness samples.
    #[must_use]
    pub const fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Overrides the report directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Overrides the report file stem.
    #[must_use]
    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = basename.into();
        self
    }

    /// Sets the graph construction seed.
    #[must_use]
    pub const fn with_graph_seed(mut self, seed: Option<u64>) -> Self {
        self.graph_seed = seed;
        self
    }

    /// Sets the query target seed.
    #[must_use]
    pub const fn with_query_seed(mut self, seed: Option<u64>) -> Self {
        self.query_seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`SuiteError::InvalidConfig`] when the size list is empty,
    /// holds a zero or repeats a size, when a structural parameter that must
    /// be positive is zero, when a duration is zero, when the sample size is below
    /// [`MIN_SAMPLE_SIZE`], or when the basename is blank.
    pub fn build(self) -> Result<SuiteConfig, SuiteError> {
        if self.sizes.is_empty() {
            return Err(invalid("at least one size is required"));
        }
        if self.sizes.contains(&0) {
            return Err(invalid("sizes must be positive"));
        }
        if let Some(size) = first_repeat(&self.sizes) {
            return Err(SuiteError::InvalidConfig {
                reason: format!("size {size} is listed more than once"),
            });
        }
        if self.dag.avg_parents == 0 {
            return Err(invalid("avg_parents must be positive"));
        }
        if self.block_dag.tx_per_block == 0 {
            return Err(invalid("tx_per_block must be positive"));
        }
        if self.block_dag.k_external == 0 {
            return Err(invalid("k_external must be positive"));
        }
        if self.warm_up.is_zero() || self.measurement.is_zero() {
            return Err(invalid("warm-up and measurement durations must be positive"));
        }
        if self.sample_size < MIN_SAMPLE_SIZE {
            return Err(SuiteError::InvalidConfig {
                reason: format!(
                    "sample_size must be at least {MIN_SAMPLE_SIZE} (got {})",
                    self.sample_size
                ),
            });
        }
        if self.basename.trim().is_empty() {
            return Err(invalid("basename must not be empty"));
        }

        Ok(SuiteConfig {
            sizes: self.sizes,
            shapes: unique(self.shapes),
            selectors: unique(self.selectors),
            shape_params: ShapeParams {
                dag: self.dag,
                block_dag: self.block_dag,
            },
            harness: HarnessSettings {
                warm_up: self.warm_up,
                measurement: self.measurement,
                sample_size: self.sample_size,
            },
            output_dir: self.output_dir,
            basename: self.basename,
            graph_seed: self.graph_seed,
            query_seed: self.query_seed,
        })
    }
}

fn first_repeat(sizes: &[usize]) -> Option<usize> {
    let mut seen = BTreeSet::new();
    sizes.iter().copied().find(|&size| !seen.insert(size))
}

/// Drops repeated entries, keeping the first occurrence of each.
fn unique<T: Copy + Ord>(items: Vec<T>) -> Vec<T> {
    let mut seen = BTreeSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

fn invalid(reason: &str) -> SuiteError {
    SuiteError::InvalidConfig {
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        let config = SuiteConfig::builder().build().expect("defaults must be valid");
        assert_eq!(config.sizes(), DEFAULT_SIZES);
        assert_eq!(config.shapes(), &Shape::ALL);
        assert_eq!(config.selectors(), &TargetSelector::ALL);
        assert_eq!(config.harness().sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(config.csv_path(), PathBuf::from("target/txdag/reachability.csv"));
    }

    #[rstest]
    #[case::no_sizes(SuiteConfig::builder().with_sizes(Vec::new()), "at least one size")]
    #[case::zero_size(SuiteConfig::builder().with_sizes(vec![10, 0]), "sizes must be positive")]
    #[case::repeated_size(
        SuiteConfig::builder().with_sizes(vec![8, 100, 8]),
        "size 8 is listed more than once"
    )]
    #[case::zero_parents(
        SuiteConfig::builder().with_dag_params(DagParams { avg_parents: 0 }),
        "avg_parents"
    )]
    #[case::zero_block(
        SuiteConfig::builder().with_block_dag_params(BlockDagParams {
            tx_per_block: 0,
            k_internal: 1,
            k_external: 1,
        }),
        "tx_per_block"
    )]
    #[case::zero_external(
        SuiteConfig::builder().with_block_dag_params(BlockDagParams {
            tx_per_block: 4,
            k_internal: 0,
            k_external: 0,
        }),
        "k_external"
    )]
    #[case::zero_warm_up(SuiteConfig::builder().with_warm_up(Duration::ZERO), "durations")]
    #[case::tiny_sample(SuiteConfig::builder().with_sample_size(3), "sample_size")]
    #[case::blank_basename(SuiteConfig::builder().with_basename("  "), "basename")]
    fn invalid_settings_are_rejected(#[case] builder: SuiteConfigBuilder, #[case] needle: &str) {
        match builder.build() {
            Err(SuiteError::InvalidConfig { reason }) => {
                assert!(reason.contains(needle), "`{reason}` should mention `{needle}`");
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn zero_internal_parents_are_allowed() {
        let config = SuiteConfig::builder()
            .with_block_dag_params(BlockDagParams {
                tx_per_block: 1,
                k_internal: 0,
                k_external: 1,
            })
            .build()
            .expect("k_internal may be zero");
        assert_eq!(config.shape_params().block_dag.k_internal, 0);
    }

    #[test]
    fn repeated_shapes_and_selectors_keep_first_occurrence() {
        let config = SuiteConfig::builder()
            .with_shapes(vec![Shape::Chain, Shape::Dag, Shape::Chain, Shape::Dag])
            .with_selectors(vec![
                TargetSelector::Random,
                TargetSelector::Latest,
                TargetSelector::Random,
            ])
            .build()
            .expect("repeats are collapsed, not rejected");
        assert_eq!(config.shapes(), &[Shape::Chain, Shape::Dag]);
        assert_eq!(
            config.selectors(),
            &[TargetSelector::Random, TargetSelector::Latest]
        );
    }
}
