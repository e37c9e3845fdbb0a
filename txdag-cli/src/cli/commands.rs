//! Command implementations and argument parsing for the txdag CLI.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use txdag_benches::{
    CriterionHarness, SuiteConfig, SuiteError, ThroughputRecord, configure_criterion,
    config::DEFAULT_OUTPUT_DIR, run_suite,
};
use txdag_core::{
    BlockDagParams, DagParams, GraphInvariantViolation, Reachability, SeedStream, Shape,
    ShapeParams, TargetSelector, VertexId, build_graph, check_graph, locate_path_to_genesis,
    rng_for,
};

const DEFAULT_AVG_PARENTS: usize = 2;
const DEFAULT_TX_PER_BLOCK: usize = 10;
const DEFAULT_K_INTERNAL: usize = 1;
const DEFAULT_K_EXTERNAL: usize = 2;
const DEFAULT_WARM_UP_MS: u64 = 500;
const DEFAULT_MEASUREMENT_MS: u64 = 1_000;
const DEFAULT_SAMPLE_SIZE: usize = 20;
const DEFAULT_BASENAME: &str = "reachability";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "txdag",
    about = "Benchmark reachability-to-genesis on synthetic transaction graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Time every shape and target at each size and write the reports.
    Suite(SuiteCommand),
    /// Build one graph, check its invariants and describe it.
    Inspect(InspectCommand),
}

/// Structural parameters shared by every command.
#[derive(Debug, Args, Clone, Copy, PartialEq, Eq)]
pub struct GraphArgs {
    /// Parents drawn per vertex in the pure DAG.
    #[arg(long = "avg-parents", default_value_t = DEFAULT_AVG_PARENTS)]
    pub avg_parents: usize,

    /// Vertices per block in the block DAG.
    #[arg(long = "tx-per-block", default_value_t = DEFAULT_TX_PER_BLOCK)]
    pub tx_per_block: usize,

    /// Parents drawn from the vertex's own block.
    #[arg(long = "k-internal", default_value_t = DEFAULT_K_INTERNAL)]
    pub k_internal: usize,

    /// Parents drawn from earlier blocks.
    #[arg(long = "k-external", default_value_t = DEFAULT_K_EXTERNAL)]
    pub k_external: usize,

    /// Seed for graph construction; entropy when omitted.
    #[arg(long = "graph-seed")]
    pub graph_seed: Option<u64>,

    /// Seed for the random query target; entropy when omitted.
    #[arg(long = "query-seed")]
    pub query_seed: Option<u64>,
}

impl Default for GraphArgs {
    fn default() -> Self {
        Self {
            avg_parents: DEFAULT_AVG_PARENTS,
            tx_per_block: DEFAULT_TX_PER_BLOCK,
            k_internal: DEFAULT_K_INTERNAL,
            k_external: DEFAULT_K_EXTERNAL,
            graph_seed: None,
            query_seed: None,
        }
    }
}

impl GraphArgs {
    fn validate(&self) -> Result<ShapeParams, CliError> {
        require_positive("avg-parents", self.avg_parents)?;
        require_positive("tx-per-block", self.tx_per_block)?;
        require_positive("k-external", self.k_external)?;
        Ok(ShapeParams {
            dag: DagParams {
                avg_parents: self.avg_parents,
            },
            block_dag: BlockDagParams {
                tx_per_block: self.tx_per_block,
                k_internal: self.k_internal,
                k_external: self.k_external,
            },
        })
    }
}

/// Options accepted by the `suite` command.
#[derive(Debug, Args, Clone)]
pub struct SuiteCommand {
    /// Comma-separated graph sizes.
    #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
    pub sizes: Vec<usize>,

    /// Structural parameters and seeds.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Warm-up time per benchmark, in milliseconds.
    #[arg(long = "warm-up-ms", default_value_t = DEFAULT_WARM_UP_MS)]
    pub warm_up_ms: u64,

    /// Measurement time per benchmark, in milliseconds.
    #[arg(long = "measurement-ms", default_value_t = DEFAULT_MEASUREMENT_MS)]
    pub measurement_ms: u64,

    /// Samples collected per benchmark (at least 10).
    #[arg(long = "sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Directory receiving the chart specification and CSV report.
    #[arg(long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// File stem shared by the written reports.
    #[arg(long, default_value = DEFAULT_BASENAME)]
    pub basename: String,
}

/// Graph shapes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    /// Linear chain.
    Chain,
    /// Pure DAG with uniformly drawn parents.
    Dag,
    /// Block-structured DAG.
    #[value(name = "blockdag")]
    BlockDag,
}

impl From<ShapeArg> for Shape {
    fn from(value: ShapeArg) -> Self {
        match value {
            ShapeArg::Chain => Self::Chain,
            ShapeArg::Dag => Self::Dag,
            ShapeArg::BlockDag => Self::BlockDag,
        }
    }
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Shape of the graph to build.
    #[arg(long, value_enum)]
    pub shape: ShapeArg,

    /// Number of vertices, genesis included.
    #[arg(long)]
    pub size: usize,

    /// Structural parameters and seeds.
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A command-line value was rejected before any work started.
    #[error("invalid value for `--{name}`: {reason}")]
    InvalidArgument {
        /// Flag name without the leading dashes.
        name: &'static str,
        /// Explanation of the rejection.
        reason: String,
    },
    /// The benchmark suite failed.
    #[error(transparent)]
    Suite(#[from] SuiteError),
    /// A built graph broke a structural invariant.
    #[error("graph invariant violated: {0}")]
    Invariant(#[from] GraphInvariantViolation),
}

fn require_positive(name: &'static str, value: usize) -> Result<(), CliError> {
    if value == 0 {
        return Err(CliError::InvalidArgument {
            name,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(())
}

/// Outcome of the `suite` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSummary {
    /// Throughput per shape, target and size.
    pub records: Vec<ThroughputRecord>,
    /// Written Vega-Lite specification.
    pub chart_path: PathBuf,
    /// Written CSV report.
    pub csv_path: PathBuf,
}

/// One query target and whether it reaches genesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSummary {
    /// Selector that chose the vertex.
    pub selector: TargetSelector,
    /// Chosen vertex.
    pub vertex: VertexId,
    /// Query outcome for the vertex.
    pub reachability: Reachability,
}

/// Outcome of the `inspect` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectSummary {
    /// Shape of the built graph.
    pub shape: Shape,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of parent edges.
    pub edge_count: usize,
    /// Targets in canonical selector order.
    pub targets: Vec<TargetSummary>,
}

impl InspectSummary {
    /// Mean number of parents per vertex, genesis included.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "Mean out-degree is a display-only ratio."
    )]
    pub fn mean_out_degree(&self) -> f64 {
        if self.vertex_count == 0 {
            return 0.0;
        }
        self.edge_count as f64 / self.vertex_count as f64
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// The benchmark suite completed.
    Suite(SuiteSummary),
    /// A graph was built and described.
    Inspect(InspectSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when validation or execution fails.
///
/// # Examples
/// ```
/// use txdag_cli::cli::{Cli, Command, ExecutionSummary, GraphArgs, InspectCommand, ShapeArg, run_cli};
///
/// let cli = Cli {
///     command: Command::Inspect(InspectCommand {
///         shape: ShapeArg::Chain,
///         size: 6,
///         graph: GraphArgs::default(),
///     }),
/// };
/// let ExecutionSummary::Inspect(summary) = run_cli(cli).expect("inspect succeeds") else {
///     panic!("inspect produces an inspect summary");
/// };
/// assert_eq!(summary.edge_count, 5);
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Suite(suite) => {
            Span::current().record("command", field::display("suite"));
            run_suite_command(suite).map(ExecutionSummary::Suite)
        }
        Command::Inspect(inspect) => {
            Span::current().record("command", field::display("inspect"));
            run_inspect_command(&inspect).map(ExecutionSummary::Inspect)
        }
    }
}

pub(super) fn suite_config(command: SuiteCommand) -> Result<SuiteConfig, CliError> {
    let params = command.graph.validate()?;
    if command.sizes.contains(&0) {
        return Err(CliError::InvalidArgument {
            name: "sizes",
            reason: "every size must be greater than zero".to_owned(),
        });
    }
    let config = SuiteConfig::builder()
        .with_sizes(command.sizes)
        .with_dag_params(params.dag)
        .with_block_dag_params(params.block_dag)
        .with_warm_up(Duration::from_millis(command.warm_up_ms))
        .with_measurement(Duration::from_millis(command.measurement_ms))
        .with_sample_size(command.sample_size)
        .with_output_dir(command.output_dir)
        .with_basename(command.basename)
        .with_graph_seed(command.graph.graph_seed)
        .with_query_seed(command.graph.query_seed)
        .build()?;
    Ok(config)
}

#[instrument(
    name = "cli.suite",
    err,
    skip(command),
    fields(sizes = field::Empty, output_dir = field::Empty)
)]
fn run_suite_command(command: SuiteCommand) -> Result<SuiteSummary, CliError> {
    let config = suite_config(command)?;
    let span = Span::current();
    span.record("sizes", field::debug(config.sizes()));
    span.record("output_dir", field::display(config.output_dir().display()));

    let criterion_dir = config.criterion_dir();
    let mut criterion = configure_criterion(config.harness(), &criterion_dir);
    let report = {
        let mut harness = CriterionHarness::new(&mut criterion, criterion_dir);
        run_suite(&config, &mut harness)?
    };
    criterion.final_summary();

    info!(records = report.records.len(), "suite completed");
    Ok(SuiteSummary {
        records: report.records,
        chart_path: report.chart_path,
        csv_path: report.csv_path,
    })
}

#[instrument(
    name = "cli.inspect",
    err,
    skip(command),
    fields(shape = field::Empty, size = command.size)
)]
pub(super) fn run_inspect_command(command: &InspectCommand) -> Result<InspectSummary, CliError> {
    let params = command.graph.validate()?;
    require_positive("size", command.size)?;
    let shape = Shape::from(command.shape);
    Span::current().record("shape", field::display(shape));

    let mut construction = rng_for(
        command.graph.graph_seed,
        SeedStream::Construction(shape),
        command.size,
    );
    let graph = build_graph(shape, command.size, &params, &mut construction);
    check_graph(&graph)?;

    let targets = TargetSelector::ALL
        .iter()
        .map(|&selector| {
            let mut rng = rng_for(
                command.graph.query_seed,
                SeedStream::Target(selector),
                graph.vertex_count(),
            );
            let vertex = selector.select(graph.vertex_count(), &mut rng);
            TargetSummary {
                selector,
                vertex,
                reachability: locate_path_to_genesis(&graph, vertex),
            }
        })
        .collect();

    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph inspected"
    );
    Ok(InspectSummary {
        shape,
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        targets,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Suite(suite) => {
            writeln!(writer, "records: {}", suite.records.len())?;
            writeln!(writer, "chart: {}", suite.chart_path.display())?;
            writeln!(writer, "csv: {}", suite.csv_path.display())?;
            for record in &suite.records {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{:.0}",
                    record.shape, record.target, record.vertex_count, record.throughput
                )?;
            }
        }
        ExecutionSummary::Inspect(inspect) => {
            writeln!(writer, "shape: {}", inspect.shape)?;
            writeln!(writer, "vertices: {}", inspect.vertex_count)?;
            writeln!(writer, "edges: {}", inspect.edge_count)?;
            writeln!(writer, "mean out-degree: {:.3}", inspect.mean_out_degree())?;
            for target in &inspect.targets {
                let outcome = match target.reachability {
                    Reachability::Reachable => "reachable",
                    Reachability::UnknownVertex => "unknown",
                    Reachability::Disconnected => "disconnected",
                };
                writeln!(writer, "{}\t{}\t{outcome}", target.selector, target.vertex)?;
            }
        }
    }
    Ok(())
}
