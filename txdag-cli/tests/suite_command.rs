//! End-to-end run of the `suite` command through Criterion.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;
use txdag_cli::cli::{Cli, Command, ExecutionSummary, GraphArgs, SuiteCommand, run_cli};

#[rstest]
fn suite_command_measures_every_job_and_writes_reports() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = TempDir::new()?;
    let cli = Cli {
        command: Command::Suite(SuiteCommand {
            sizes: vec![8],
            graph: GraphArgs {
                graph_seed: Some(3),
                query_seed: Some(4),
                ..GraphArgs::default()
            },
            warm_up_ms: 1,
            measurement_ms: 5,
            sample_size: 10,
            output_dir: dir.path().to_path_buf(),
            basename: "smoke".to_owned(),
        }),
    };

    let ExecutionSummary::Suite(summary) = run_cli(cli)? else {
        panic!("expected a suite summary");
    };

    assert_eq!(summary.records.len(), 12);
    assert!(summary.records.iter().all(|r| r.vertex_count == 8));
    assert!(summary.records.iter().all(|r| r.throughput > 0.0));
    assert_eq!(summary.chart_path, dir.path().join("smoke.vl.json"));
    assert!(dir.path().join("criterion/reachability/chain_latest/8/new/estimates.json").exists());

    let csv = fs::read_to_string(&summary.csv_path)?;
    assert_eq!(csv.lines().count(), 13);
    assert!(csv.lines().any(|line| line.starts_with("blockdag,random,8,")));
    Ok(())
}
