//! Test support: a [`ProcessRunner`] that replays scripted results.
//!
//! Used by this crate's tests and by hosts that need to exercise the lint
//! pipeline without a Python installation.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{InvocationPlan, ProcessRunner, RawResult};

/// One observed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub plan: InvocationPlan,
    /// Content of the shadow file while the run was in progress.
    pub shadow_content: Option<String>,
}

type Hook = Box<dyn Fn(&InvocationPlan) + Send + Sync>;

/// Replays queued results in order; an empty queue yields empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<RawResult, io::ErrorKind>>>,
    calls: Mutex<Vec<RecordedCall>>,
    hook: Option<Hook>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        ScriptedRunner::default()
    }

    #[must_use]
    pub fn with_response(self, result: RawResult) -> Self {
        self.responses.lock().push_back(Ok(result));
        self
    }

    /// Queue a successful run printing `stdout`.
    #[must_use]
    pub fn with_stdout(self, stdout: &str) -> Self {
        self.with_response(RawResult {
            exit_code: Some(if stdout.is_empty() { 0 } else { 1 }),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    /// Queue a failed run printing `stderr`.
    #[must_use]
    pub fn with_stderr(self, stderr: &str) -> Self {
        self.with_response(RawResult {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    /// Queue a run that cannot be started.
    #[must_use]
    pub fn with_spawn_error(self, kind: io::ErrorKind) -> Self {
        self.responses.lock().push_back(Err(kind));
        self
    }

    /// Call `hook` at the start of every run.
    #[must_use]
    pub fn with_hook(mut self, hook: impl Fn(&InvocationPlan) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, plan: &InvocationPlan) -> io::Result<RawResult> {
        if let Some(hook) = &self.hook {
            hook(plan);
        }

        let shadow_content = match shadow_path(plan) {
            Some(path) => tokio::fs::read_to_string(path).await.ok(),
            None => None,
        };
        self.calls.lock().push(RecordedCall {
            plan: plan.clone(),
            shadow_content,
        });

        let next = self.responses.lock().pop_front();
        match next {
            Some(Ok(result)) => Ok(result),
            Some(Err(kind)) => Err(io::Error::from(kind)),
            None => Ok(RawResult {
                exit_code: Some(0),
                ..RawResult::default()
            }),
        }
    }
}

/// The temporary path of a `--shadow-file <real> <temp>` pair.
fn shadow_path(plan: &InvocationPlan) -> Option<PathBuf> {
    let position = plan.arguments.iter().position(|arg| arg == "--shadow-file")?;
    plan.arguments.get(position + 2).map(PathBuf::from)
}
