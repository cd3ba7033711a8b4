use crate::pipeline::StepSpec;
use std::time::Duration;
use tokio::process::Command;
use tokio::time;

/// Raw result of executing one step's command.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    Completed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    TimedOut,
    SpawnError(String),
}

/// Seam between the driver and real subprocesses: tests substitute a
/// scripted runner and exercise the full failure handling without spawning
/// anything.
#[async_trait::async_trait]
pub trait StepRunner: Send + Sync {
    async fn run_step(&self, step: &StepSpec, timeout: Duration) -> StepOutcome;
}

/// Runs steps as real child processes, killing them on timeout.
pub struct CommandRunner;

#[async_trait::async_trait]
impl StepRunner for CommandRunner {
    async fn run_step(&self, step: &StepSpec, timeout: Duration) -> StepOutcome {
        let output = Command::new(&step.command)
            .args(&step.args)
            .kill_on_drop(true)
            .output();

        match time::timeout(timeout, output).await {
            Err(_) => StepOutcome::TimedOut,
            Ok(Err(e)) => StepOutcome::SpawnError(format!("{}: {e}", step.command)),
            Ok(Ok(out)) => StepOutcome::Completed {
                exit_code: out.status.code(),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            },
        }
    }
}
