//! Benchmark harness seam.
//!
//! The suite hands its job table and prepared inputs to a [`Harness`] and gets
//! back one [`HarnessSample`] per timed (job, input) pair. [`CriterionHarness`]
//! is the production implementation; tests substitute their own.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use criterion::{BenchmarkGroup, BenchmarkId, Criterion, measurement::WallTime};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{config::HarnessSettings, error::SuiteError, jobs::JobTable, setup::SuiteInput};

/// Criterion group name shared by every reachability benchmark.
pub const GROUP_NAME: &str = "reachability";

/// Mean timing for one job at one input.
#[derive(Clone, Debug, PartialEq)]
pub struct HarnessSample {
    /// Name of the timed job, as produced by [`crate::jobs::Job::name`].
    pub job_name: String,
    /// Label of the input, as produced by [`SuiteInput::label`].
    pub input_label: String,
    /// Mean wall-clock nanoseconds per query.
    pub mean_ns: f64,
}

/// Executes every job against every input and reports mean timings.
pub trait Harness {
    /// Times each (job, input) pair.
    ///
    /// # Errors
    /// Returns a [`SuiteError`] when timings cannot be collected.
    fn run(
        &mut self,
        jobs: &JobTable,
        inputs: &[SuiteInput],
    ) -> Result<Vec<HarnessSample>, SuiteError>;
}

/// Builds a Criterion instance honouring `settings` and writing under
/// `output_dir`.
#[must_use]
pub fn configure_criterion(settings: HarnessSettings, output_dir: &Path) -> Criterion {
    Criterion::default()
        .warm_up_time(settings.warm_up)
        .measurement_time(settings.measurement)
        .sample_size(settings.sample_size)
        .output_directory(output_dir)
}

/// Registers one benchmark per (job, input) pair in `group`.
pub(crate) fn register_jobs(
    group: &mut BenchmarkGroup<'_, WallTime>,
    jobs: &JobTable,
    inputs: &[SuiteInput],
) {
    for input in inputs {
        for job in jobs.iter() {
            group.bench_with_input(
                BenchmarkId::new(job.name(), input.size()),
                input,
                |b, prepared| {
                    b.iter(|| job.run(std::hint::black_box(prepared)));
                },
            );
        }
    }
}

/// Runs jobs through Criterion and reads its estimates back from disk.
pub struct CriterionHarness<'c> {
    criterion: &'c mut Criterion,
    output_dir: PathBuf,
}

impl<'c> CriterionHarness<'c> {
    /// Wraps `criterion`, which must already write its reports under
    /// `output_dir` (see [`configure_criterion`]).
    #[must_use]
    pub fn new(criterion: &'c mut Criterion, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            criterion,
            output_dir: output_dir.into(),
        }
    }
}

impl Harness for CriterionHarness<'_> {
    #[instrument(name = "criterion_harness", skip_all, fields(jobs = jobs.len()))]
    fn run(
        &mut self,
        jobs: &JobTable,
        inputs: &[SuiteInput],
    ) -> Result<Vec<HarnessSample>, SuiteError> {
        clear_estimates(&self.output_dir, jobs, inputs)?;
        let mut group = self.criterion.benchmark_group(GROUP_NAME);
        register_jobs(&mut group, jobs, inputs);
        group.finish();

        let mut samples = Vec::with_capacity(jobs.len().saturating_mul(inputs.len()));
        for input in inputs {
            let label = input.label();
            for job in jobs.iter() {
                let path = estimates_path(&self.output_dir, job.name(), &label);
                // Benchmarks skipped by a filter or `--list` leave no estimates for this run.
                let Some(estimates) = read_estimates(&path)? else {
                    debug!(path = %path.display(), "no estimates recorded");
                    continue;
                };
                samples.push(HarnessSample {
                    job_name: job.name().to_owned(),
                    input_label: label.clone(),
                    mean_ns: estimates.mean.point_estimate,
                });
            }
        }
        Ok(samples)
    }
}

#[derive(Debug, Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Debug, Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Location of Criterion's latest estimates for one benchmark.
#[must_use]
pub fn estimates_path(output_dir: &Path, job_name: &str, input_label: &str) -> PathBuf {
    output_dir
        .join(GROUP_NAME)
        .join(job_name)
        .join(input_label)
        .join("new")
        .join("estimates.json")
}

/// Removes estimates left by earlier runs, so only benchmarks Criterion
/// times in this run are read back.
fn clear_estimates(
    output_dir: &Path,
    jobs: &JobTable,
    inputs: &[SuiteInput],
) -> Result<(), SuiteError> {
    for input in inputs {
        let label = input.label();
        for job in jobs.iter() {
            let path = estimates_path(output_dir, job.name(), &label);
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "cleared earlier estimates"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(SuiteError::EstimatesIo { path, source }),
            }
        }
    }
    Ok(())
}

fn read_estimates(path: &Path) -> Result<Option<Estimates>, SuiteError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SuiteError::EstimatesIo {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| SuiteError::EstimatesFormat {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;
    use txdag_core::{Shape, ShapeParams, TargetSelector};

    const ESTIMATES: &str = r#"{
        "mean": {
            "confidence_interval": {"confidence_level": 0.95, "lower_bound": 90.0, "upper_bound": 110.0},
            "point_estimate": 100.0,
            "standard_error": 2.5
        },
        "median": {
            "confidence_interval": {"confidence_level": 0.95, "lower_bound": 95.0, "upper_bound": 105.0},
            "point_estimate": 99.0,
            "standard_error": 1.5
        }
    }"#;

    #[rstest]
    fn estimates_path_follows_criterion_layout() {
        let path = estimates_path(Path::new("out"), "dag_middle", "1000");
        assert_eq!(
            path,
            PathBuf::from("out/reachability/dag_middle/1000/new/estimates.json")
        );
    }

    #[rstest]
    fn reads_mean_point_estimate() {
        let dir = TempDir::new().expect("tempdir");
        let path = estimates_path(dir.path(), "chain_latest", "10");
        fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        fs::write(&path, ESTIMATES).expect("write estimates");

        let estimates = read_estimates(&path)
            .expect("readable")
            .expect("present");
        assert!((estimates.mean.point_estimate - 100.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn missing_estimates_are_skipped() {
        let dir = TempDir::new().expect("tempdir");
        let path = estimates_path(dir.path(), "chain_latest", "10");
        assert!(read_estimates(&path).expect("not an error").is_none());
    }

    #[rstest]
    fn malformed_estimates_are_reported() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("estimates.json");
        fs::write(&path, "{\"median\": 1}").expect("write estimates");
        let err = read_estimates(&path).expect_err("mean is required");
        assert!(matches!(err, SuiteError::EstimatesFormat { .. }));
    }

    #[rstest]
    fn earlier_estimates_are_cleared_before_a_run() {
        let dir = TempDir::new().expect("tempdir");
        let jobs = JobTable::for_selection(&[Shape::Chain], &[TargetSelector::Latest]);
        let inputs = [SuiteInput::build(8, &ShapeParams::default(), Some(1), Some(1))];
        let stale = estimates_path(dir.path(), "chain_latest", "8");
        let unrelated = estimates_path(dir.path(), "dag_latest", "8");
        for path in [&stale, &unrelated] {
            fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
            fs::write(path, ESTIMATES).expect("write estimates");
        }

        clear_estimates(dir.path(), &jobs, &inputs).expect("cleared");
        assert!(read_estimates(&stale).expect("not an error").is_none());
        assert!(unrelated.exists());

        clear_estimates(dir.path(), &jobs, &inputs).expect("clearing twice is harmless");
    }
}
