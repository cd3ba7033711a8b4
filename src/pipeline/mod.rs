// Pipeline module: sequential step execution with per-step outcomes.

pub mod driver;
pub mod progress;
pub mod runner;
pub mod validate;

pub use driver::PipelineDriver;
pub use runner::{CommandRunner, StepOutcome, StepRunner};
pub use validate::{run_validation, ValidationReport};

use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Which phase of the pipeline a step belongs to. Extraction steps are the
/// ones skipped by `--skip-download`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPhase {
    Extraction,
    Integration,
    Generation,
}

/// One pipeline step: an external command plus the files it must produce.
///
/// The command owns the atomicity of its outputs (replace-or-nothing); the
/// driver only verifies the expected files exist after a zero exit.
#[derive(Debug, Clone, Deserialize)]
pub struct StepSpec {
    pub name: String,
    pub description: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub expected_outputs: Vec<PathBuf>,
    pub phase: StepPhase,
}

impl StepSpec {
    /// The script file this step runs, for prerequisite checks. Steps run
    /// through an interpreter report the script argument, not the
    /// interpreter itself.
    pub fn script(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or(&self.command)
    }
}

/// Lifecycle of one step within a run.
#[derive(Debug, Clone, PartialEq)]
pub enum StepState {
    Pending,
    Running,
    Succeeded,
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
    TimedOut,
}

/// Outcome of one step after the run finished (or was aborted).
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub name: String,
    pub phase: StepPhase,
    pub state: StepState,
    pub elapsed: Duration,
}

/// Ordered step outcomes for one pipeline run.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub records: Vec<StepRecord>,
    pub elapsed: Duration,
}

impl RunReport {
    /// True only when every step in the sequence succeeded.
    pub fn success(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| r.state == StepState::Succeeded)
    }

    /// The error that aborted the run, if any.
    pub fn first_failure(&self) -> Option<PipelineError> {
        self.records.iter().find_map(|r| match &r.state {
            StepState::Failed { exit_code, .. } => Some(PipelineError::StepFailed {
                step: r.name.clone(),
                code: *exit_code,
            }),
            StepState::TimedOut => Some(PipelineError::StepTimedOut {
                step: r.name.clone(),
                seconds: r.elapsed.as_secs(),
            }),
            _ => None,
        })
    }
}
