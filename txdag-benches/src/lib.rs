//! Reachability benchmark suite for txdag.
//!
//! Prepares chain, pure DAG and block DAG graphs at each configured size,
//! times reachability-to-genesis queries from four target positions through a
//! pluggable [`harness::Harness`], and writes the results as a Vega-Lite chart
//! specification and a CSV table.

pub mod config;
pub mod error;
pub mod harness;
pub mod jobs;
pub mod report;
pub mod setup;
pub mod suite;

pub use crate::{
    config::{HarnessSettings, SuiteConfig, SuiteConfigBuilder},
    error::SuiteError,
    harness::{CriterionHarness, Harness, HarnessSample, configure_criterion},
    jobs::{Job, JobId, JobTable},
    report::ThroughputRecord,
    setup::SuiteInput,
    suite::{SuiteReport, run_suite},
};
