//! Running mypy for mypy-lint.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                CheckerInvoker                │
//! │  - builds the InvocationPlan                 │
//! │  - shadows unsaved content (ShadowFile)      │
//! │  - classifies the RawResult                  │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//!              ┌──────────────────┐
//!              │  ProcessRunner   │  TokioProcessRunner in production,
//!              └──────────────────┘  ScriptedRunner in tests
//! ```
//!
//! mypy exits with status 1 both when it finds type errors and when it
//! cannot run at all, so the exit status is recorded but never used to decide
//! success. Output on stderr is the only failure signal.

mod error;
mod invoker;
mod plan;
mod runner;
mod shadow;
pub mod testing;

pub use error::{ExternalToolError, InvokeError};
pub use invoker::{CheckTarget, CheckerInvoker, Invocation, FAILURE_MESSAGE};
pub use plan::{InvocationDebug, InvocationPlan, RawResult, MYPYPATH_ENV};
pub use runner::{ProcessRunner, TokioProcessRunner};
pub use shadow::ShadowFile;
