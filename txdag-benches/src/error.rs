//! Suite error type.
//!
//! Aggregates the failures that may arise while configuring, preparing,
//! measuring and reporting a reachability suite so that each stage can
//! propagate with `?` instead of panicking.

use std::{io, path::PathBuf};

use txdag_core::VertexId;

/// Errors that may occur while running a reachability suite.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    /// The suite configuration was rejected.
    #[error("invalid suite configuration: {reason}")]
    InvalidConfig {
        /// Explanation of the rejected setting.
        reason: String,
    },
    /// The job table was empty, so there is nothing to measure.
    #[error("no benchmark jobs were generated")]
    NoJobs,
    /// The harness returned no usable measurements.
    #[error("the benchmark harness produced no result records")]
    NoResults,
    /// A prepared query target could not reach genesis.
    #[error("job `{job}` at size {size}: vertex {vertex} cannot reach genesis")]
    InvariantViolation {
        /// Name of the failing job.
        job: String,
        /// Graph size of the failing input.
        size: usize,
        /// Query target that failed.
        vertex: VertexId,
    },
    /// A harness sample named a job that is not in the job table.
    #[error("harness reported unknown job `{name}`")]
    UnknownJob {
        /// Job name reported by the harness.
        name: String,
    },
    /// A harness sample named an input that was never prepared.
    #[error("harness reported unknown input `{label}`")]
    UnknownInput {
        /// Input label reported by the harness.
        label: String,
    },
    /// A harness sample carried a non-positive or non-finite timing.
    #[error("job `{job}` at input `{label}` reported an unusable mean time")]
    InvalidMeasurement {
        /// Job name reported by the harness.
        job: String,
        /// Input label reported by the harness.
        label: String,
    },
    /// Criterion estimates could not be read back or cleared.
    #[error("failed to access benchmark estimates `{path}`: {source}")]
    EstimatesIo {
        /// Path of the estimates file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Criterion estimates were not valid JSON.
    #[error("failed to parse benchmark estimates `{path}`: {source}")]
    EstimatesFormat {
        /// Path of the estimates file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing a report failed.
    #[error("failed to write report `{path}`: {source}")]
    Report {
        /// Destination path of the report.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Serialising the chart specification failed.
    #[error("failed to serialise chart specification: {0}")]
    Serialize(#[from] serde_json::Error),
}
