//! Process execution.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::{InvocationPlan, RawResult};

/// Runs a planned process to completion and captures its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, plan: &InvocationPlan) -> io::Result<RawResult>;
}

/// Runs processes with `tokio::process`.
///
/// The child is killed if the returned future is dropped, so a host that
/// abandons a lint request does not leave mypy running.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, plan: &InvocationPlan) -> io::Result<RawResult> {
        let output = Command::new(&plan.executable)
            .args(&plan.arguments)
            .current_dir(&plan.working_directory)
            .envs(&plan.environment)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(RawResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
