//! Result reshaping and report writers.
//!
//! Harness samples are mapped back to typed `(shape, target, size)` records,
//! converted to queries per second and written as a Vega-Lite chart
//! specification plus a flat CSV table.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use txdag_core::{Shape, TargetSelector};

use crate::{error::SuiteError, harness::HarnessSample, jobs::JobTable};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Throughput of one job at one graph size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThroughputRecord {
    /// Graph shape.
    #[serde(serialize_with = "shape_name")]
    pub shape: Shape,
    /// Target selector.
    #[serde(serialize_with = "selector_name")]
    pub target: TargetSelector,
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Reachability queries per second.
    pub throughput: f64,
}

fn shape_name<S: Serializer>(shape: &Shape, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(shape.as_str())
}

fn selector_name<S: Serializer>(
    selector: &TargetSelector,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(selector.as_str())
}

impl ThroughputRecord {
    const fn csv_header() -> &'static str {
        "shape,target,vertex_count,throughput\n"
    }

    fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.3}\n",
            self.shape, self.target, self.vertex_count, self.throughput
        )
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Throughput is the reciprocal of the mean time per query."
)]
fn queries_per_second(mean_ns: f64) -> Option<f64> {
    (mean_ns.is_finite() && mean_ns > 0.0).then(|| NANOS_PER_SECOND / mean_ns)
}

/// Maps harness samples back onto the job table.
///
/// Records are sorted by shape, then target, then vertex count.
///
/// # Errors
/// - [`SuiteError::NoResults`] when `samples` is empty.
/// - [`SuiteError::UnknownJob`] when a sample names a job outside `jobs`.
/// - [`SuiteError::UnknownInput`] when a sample's input label is not a size.
/// - [`SuiteError::InvalidMeasurement`] when a mean time is not a positive
///   finite number.
pub fn shape_results(
    jobs: &JobTable,
    samples: &[HarnessSample],
) -> Result<Vec<ThroughputRecord>, SuiteError> {
    if samples.is_empty() {
        return Err(SuiteError::NoResults);
    }

    let mut records = samples
        .iter()
        .map(|sample| {
            let job = jobs
                .find(&sample.job_name)
                .ok_or_else(|| SuiteError::UnknownJob {
                    name: sample.job_name.clone(),
                })?;
            let vertex_count =
                sample
                    .input_label
                    .parse::<usize>()
                    .map_err(|_| SuiteError::UnknownInput {
                        label: sample.input_label.clone(),
                    })?;
            let throughput =
                queries_per_second(sample.mean_ns).ok_or_else(|| SuiteError::InvalidMeasurement {
                    job: sample.job_name.clone(),
                    label: sample.input_label.clone(),
                })?;
            Ok(ThroughputRecord {
                shape: job.id().shape,
                target: job.id().selector,
                vertex_count,
                throughput,
            })
        })
        .collect::<Result<Vec<_>, SuiteError>>()?;

    records.sort_by_key(|record| (record.shape, record.target, record.vertex_count));
    Ok(records)
}

/// Builds a Vega-Lite v5 document: one column per target selector, one line
/// per shape, vertex count on a log-scaled x axis.
///
/// # Errors
/// Returns [`SuiteError::Serialize`] when the records cannot be converted to
/// JSON.
pub fn chart_spec(records: &[ThroughputRecord]) -> Result<Value, SuiteError> {
    let values = serde_json::to_value(records)?;
    let target_order: Vec<&str> = TargetSelector::ALL.iter().map(|s| s.as_str()).collect();
    let shape_order: Vec<&str> = Shape::ALL.iter().map(|s| s.as_str()).collect();

    Ok(json!({
        "$schema": VEGA_LITE_SCHEMA,
        "description": "Reachability-to-genesis throughput by graph shape and query target",
        "data": { "values": values },
        "facet": {
            "column": {
                "field": "target",
                "type": "nominal",
                "title": "Target",
                "sort": target_order,
            }
        },
        "spec": {
            "mark": { "type": "line", "point": true },
            "encoding": {
                "x": {
                    "field": "vertex_count",
                    "type": "quantitative",
                    "title": "Vertices",
                    "scale": { "type": "log" },
                },
                "y": {
                    "field": "throughput",
                    "type": "quantitative",
                    "title": "Queries per second",
                },
                "color": {
                    "field": "shape",
                    "type": "nominal",
                    "title": "Shape",
                    "sort": shape_order,
                },
                "tooltip": [
                    { "field": "shape", "type": "nominal", "title": "Shape" },
                    { "field": "target", "type": "nominal", "title": "Target" },
                    { "field": "vertex_count", "type": "quantitative", "title": "Vertices" },
                    {
                        "field": "throughput",
                        "type": "quantitative",
                        "title": "Queries per second",
                        "format": ",.0f",
                    },
                ],
            },
        },
    }))
}

/// Writes the chart specification for `records` to `path`.
///
/// Parent directories are created as needed.
///
/// # Errors
/// Returns [`SuiteError::Serialize`] or [`SuiteError::Report`].
pub fn write_chart_spec(
    path: impl AsRef<Path>,
    records: &[ThroughputRecord],
) -> Result<PathBuf, SuiteError> {
    let mut text = serde_json::to_string_pretty(&chart_spec(records)?)?;
    text.push('\n');
    write_report(path.as_ref(), &text)
}

/// Writes `records` as CSV to `path`.
///
/// # Errors
/// Returns [`SuiteError::Report`] if directory creation or file writing fails.
pub fn write_csv_report(
    path: impl AsRef<Path>,
    records: &[ThroughputRecord],
) -> Result<PathBuf, SuiteError> {
    let mut output = String::from(ThroughputRecord::csv_header());
    for record in records {
        output.push_str(&record.to_csv_row());
    }
    write_report(path.as_ref(), &output)
}

fn write_report(path: &Path, contents: &str) -> Result<PathBuf, SuiteError> {
    let to_report_error = |source| SuiteError::Report {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_report_error)?;
    }
    fs::write(path, contents).map_err(to_report_error)?;
    Ok(path.to_path_buf())
}
