//! Small helpers shared across CLI tests.

use tempfile::TempDir;

use super::{Cli, CliError, Command, GraphArgs, InspectCommand, ShapeArg, SuiteCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn seeded_graph_args() -> GraphArgs {
    GraphArgs {
        graph_seed: Some(11),
        query_seed: Some(13),
        ..GraphArgs::default()
    }
}

pub(super) fn inspect(shape: ShapeArg, size: usize, graph: GraphArgs) -> Cli {
    Cli {
        command: Command::Inspect(InspectCommand { shape, size, graph }),
    }
}

pub(super) fn suite(dir: &TempDir, sizes: Vec<usize>, graph: GraphArgs) -> SuiteCommand {
    SuiteCommand {
        sizes,
        graph,
        warm_up_ms: 1,
        measurement_ms: 1,
        sample_size: 10,
        output_dir: dir.path().to_path_buf(),
        basename: "reachability".to_owned(),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
