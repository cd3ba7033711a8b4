use crate::pipeline::{
    progress, RunReport, StepOutcome, StepRecord, StepRunner, StepSpec, StepState,
};
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::warn;

/// How many trailing stdout lines a successful step echoes.
const STDOUT_TAIL_LINES: usize = 5;

/// Drives an ordered list of steps strictly sequentially.
///
/// Each step moves `Pending → Running → Succeeded | Failed | TimedOut`.
/// The first step that does not succeed aborts the run; later steps are
/// never attempted and stay `Pending` in the report. There is no retry and
/// no cancellation beyond the per-step timeout.
pub struct PipelineDriver<R> {
    runner: R,
    timeout: Duration,
}

impl<R: StepRunner> PipelineDriver<R> {
    pub fn new(runner: R, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    pub async fn run(&self, steps: &[StepSpec]) -> RunReport {
        let started_at = Utc::now();
        let run_start = Instant::now();
        let mut records: Vec<StepRecord> = steps
            .iter()
            .map(|s| StepRecord {
                name: s.name.clone(),
                phase: s.phase,
                state: StepState::Pending,
                elapsed: Duration::ZERO,
            })
            .collect();

        for (i, step) in steps.iter().enumerate() {
            progress::info(format!("{}...", step.description));
            progress::info(format!("Running: {}", step.name));
            records[i].state = StepState::Running;

            let step_start = Instant::now();
            let outcome = self.runner.run_step(step, self.timeout).await;
            let elapsed = step_start.elapsed();
            records[i].elapsed = elapsed;
            records[i].state = self.resolve(step, outcome, elapsed);

            if records[i].state != StepState::Succeeded {
                progress::error(format!("Pipeline failed at: {}", step.description));
                break;
            }
        }

        RunReport {
            started_at,
            records,
            elapsed: run_start.elapsed(),
        }
    }

    fn resolve(&self, step: &StepSpec, outcome: StepOutcome, elapsed: Duration) -> StepState {
        match outcome {
            StepOutcome::Completed {
                exit_code: Some(0),
                stdout,
                ..
            } => {
                // A zero exit is not enough: the step's contract is the
                // files it promised to produce.
                for output in &step.expected_outputs {
                    if !output.exists() {
                        progress::error(format!("{} failed!", step.description));
                        progress::error(format!("Missing expected output: {}", output.display()));
                        return StepState::Failed {
                            exit_code: Some(0),
                            stderr: format!("missing expected output: {}", output.display()),
                        };
                    }
                }
                progress::ok(format!(
                    "{} completed in {:.1}s",
                    step.description,
                    elapsed.as_secs_f64()
                ));
                progress::tail(&stdout, STDOUT_TAIL_LINES);
                StepState::Succeeded
            }
            StepOutcome::Completed {
                exit_code,
                stderr,
                ..
            } => {
                progress::error(format!("{} failed!", step.description));
                progress::error(format!("Exit code: {exit_code:?}"));
                if !stderr.is_empty() {
                    progress::error("Error output:");
                    println!("{stderr}");
                }
                StepState::Failed { exit_code, stderr }
            }
            StepOutcome::TimedOut => {
                progress::error(format!(
                    "{} timed out after {} minutes",
                    step.description,
                    self.timeout.as_secs() / 60
                ));
                StepState::TimedOut
            }
            StepOutcome::SpawnError(reason) => {
                warn!("Spawn failure for step {}: {}", step.name, reason);
                progress::error(format!("{} failed with exception: {reason}", step.description));
                StepState::Failed {
                    exit_code: None,
                    stderr: reason,
                }
            }
        }
    }
}
