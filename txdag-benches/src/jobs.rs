//! Typed job table.
//!
//! A job pairs a graph shape with a target selector. Job names are derived
//! from that pair and looked up again when results come back from the
//! harness, so no caller ever concatenates or splits names by hand.

use std::fmt;

use tracing::{debug, instrument};
use txdag_core::{Shape, TargetSelector, query_path_to_genesis};

use crate::{error::SuiteError, setup::SuiteInput};

/// Identifies one benchmark job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId {
    /// Graph shape queried by the job.
    pub shape: Shape,
    /// Rule choosing the queried vertex.
    pub selector: TargetSelector,
}

impl JobId {
    /// Harness-facing name, `"{shape}_{selector}"`.
    ///
    /// # Examples
    /// ```
    /// use txdag_benches::jobs::JobId;
    /// use txdag_core::{Shape, TargetSelector};
    ///
    /// let id = JobId { shape: Shape::BlockDag, selector: TargetSelector::NearGenesis };
    /// assert_eq!(id.name(), "blockdag_near_genesis");
    /// ```
    #[must_use]
    pub fn name(self) -> String {
        format!("{}_{}", self.shape.as_str(), self.selector.as_str())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.shape, self.selector)
    }
}

/// A named reachability query against one shape and target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    name: String,
}

impl Job {
    /// Creates the job for `id`.
    #[must_use]
    pub fn new(id: JobId) -> Self {
        Self { id, name: id.name() }
    }

    /// Typed identity.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Harness-facing name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the query this job times.
    #[must_use]
    pub fn run(&self, input: &SuiteInput) -> bool {
        query_path_to_genesis(input.graph(self.id.shape), input.target(self.id.selector))
    }
}

/// Ordered set of jobs measured by a suite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    /// Every shape paired with every selector, shapes outermost.
    #[must_use]
    pub fn cross_product() -> Self {
        Self::for_selection(&Shape::ALL, &TargetSelector::ALL)
    }

    /// Every pairing of the given shapes and selectors.
    #[must_use]
    pub fn for_selection(shapes: &[Shape], selectors: &[TargetSelector]) -> Self {
        let jobs = shapes
            .iter()
            .flat_map(|&shape| {
                selectors
                    .iter()
                    .map(move |&selector| Job::new(JobId { shape, selector }))
            })
            .collect();
        Self { jobs }
    }

    /// Jobs in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Number of jobs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the table holds no jobs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.name == name)
    }
}

/// Runs every job once against every input before timing starts.
///
/// # Errors
/// Returns [`SuiteError::InvariantViolation`] for the first job whose target
/// cannot reach genesis.
#[instrument(skip_all, fields(jobs = jobs.len(), inputs = inputs.len()))]
pub fn verify_inputs(jobs: &JobTable, inputs: &[SuiteInput]) -> Result<(), SuiteError> {
    for input in inputs {
        for job in jobs.iter() {
            if !job.run(input) {
                return Err(SuiteError::InvariantViolation {
                    job: job.name().to_owned(),
                    size: input.size(),
                    vertex: input.target(job.id().selector),
                });
            }
        }
        debug!(size = input.size(), "inputs verified");
    }
    Ok(())
}
