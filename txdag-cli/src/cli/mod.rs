//! Command-line interface orchestration for txdag.
//!
//! `suite` runs the reachability benchmark suite through Criterion and writes
//! its chart specification and CSV report; `inspect` builds a single graph and
//! describes it.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, InspectCommand, InspectSummary,
    ShapeArg, SuiteCommand, SuiteSummary, TargetSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
