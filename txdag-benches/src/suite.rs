//! End-to-end suite driver.

use std::path::PathBuf;

use tracing::{Span, info, instrument};

use crate::{
    config::SuiteConfig,
    error::SuiteError,
    harness::Harness,
    jobs::{JobTable, verify_inputs},
    report::{ThroughputRecord, shape_results, write_chart_spec, write_csv_report},
    setup::prepare_inputs,
};

/// Outcome of a completed suite run.
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    /// Throughput records in report order.
    pub records: Vec<ThroughputRecord>,
    /// Path of the written Vega-Lite specification.
    pub chart_path: PathBuf,
    /// Path of the written CSV report.
    pub csv_path: PathBuf,
}

/// Builds every input, verifies it, times every job through `harness` and
/// writes the chart specification and CSV report.
///
/// No file is written unless the harness produced at least one record.
///
/// # Errors
/// - [`SuiteError::NoJobs`] when the configured selection is empty.
/// - [`SuiteError::InvariantViolation`] when a prepared target cannot reach
///   genesis.
/// - Any error raised by the harness, by [`shape_results`], or while writing
///   reports.
#[instrument(
    skip_all,
    fields(sizes = ?config.sizes(), jobs = tracing::field::Empty, records = tracing::field::Empty)
)]
pub fn run_suite<H>(config: &SuiteConfig, harness: &mut H) -> Result<SuiteReport, SuiteError>
where
    H: Harness + ?Sized,
{
    let jobs = JobTable::for_selection(config.shapes(), config.selectors());
    if jobs.is_empty() {
        return Err(SuiteError::NoJobs);
    }
    Span::current().record("jobs", jobs.len());

    let inputs = prepare_inputs(config);
    verify_inputs(&jobs, &inputs)?;

    let samples = harness.run(&jobs, &inputs)?;
    let records = shape_results(&jobs, &samples)?;
    Span::current().record("records", records.len());

    let chart_path = write_chart_spec(config.chart_path(), &records)?;
    let csv_path = write_csv_report(config.csv_path(), &records)?;
    info!(
        chart = %chart_path.display(),
        csv = %csv_path.display(),
        "suite reports written"
    );

    Ok(SuiteReport {
        records,
        chart_path,
        csv_path,
    })
}
