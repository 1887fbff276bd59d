//! Execution strategies: how the handlers registered for one event are run.

use crate::error::{Error, HandlerError, Result};
use crate::handler::Handler;
use crate::hooks::{EventName, HookInput, HookOutput};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Deadline applied to a dispatch when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one handler for one event.
#[derive(Debug, Clone)]
pub struct HandlerResult {
    /// Registration position of the handler.
    pub index: usize,

    /// Output, if the handler finished successfully.
    pub output: Option<HookOutput>,

    /// Error, if the handler failed.
    pub error: Option<HandlerError>,
}

impl HandlerResult {
    /// Slot for a handler that has not reported yet.
    #[must_use]
    pub fn pending(index: usize) -> Self {
        Self {
            index,
            output: None,
            error: None,
        }
    }

    /// Slot for a handler that returned `output`.
    #[must_use]
    pub fn succeeded(index: usize, output: HookOutput) -> Self {
        Self {
            index,
            output: Some(output),
            error: None,
        }
    }

    /// Slot for a handler that failed with `error`.
    #[must_use]
    pub fn failed(index: usize, error: HandlerError) -> Self {
        Self {
            index,
            output: None,
            error: Some(error),
        }
    }

    /// True once the handler produced an output or an error.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.output.is_some() || self.error.is_some()
    }

    /// True if the output is present and blocks.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.output.as_ref().is_some_and(HookOutput::is_blocking)
    }
}

/// Wall-clock budget for one dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// Total time allowed.
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left, zero once elapsed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    /// True once the budget is used up.
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.started.elapsed() >= self.budget
    }
}

/// Execution stopped early with an error.
///
/// `results` holds whatever was gathered before the stop.
#[derive(Debug)]
pub struct ExecutionFailure {
    pub results: Vec<HandlerResult>,
    pub error: Error,
}

impl ExecutionFailure {
    fn cancelled(results: Vec<HandlerResult>, deadline: &Deadline, total: usize) -> Self {
        let completed = results.iter().filter(|r| r.is_settled()).count();
        Self {
            results,
            error: Error::Cancelled {
                deadline: deadline.budget(),
                completed,
                total,
            },
        }
    }
}

impl From<ExecutionFailure> for Error {
    fn from(failure: ExecutionFailure) -> Self {
        failure.error
    }
}

/// Results ordered by handler index, or the reason execution stopped.
pub type Execution = std::result::Result<Vec<HandlerResult>, ExecutionFailure>;

/// Runs an ordered list of handlers against one event.
pub trait Executor: Send + Sync {
    fn execute(
        &self,
        handlers: &[Arc<dyn Handler>],
        input: &Arc<HookInput>,
        name: EventName,
        deadline: Deadline,
    ) -> Execution;
}

/// Execution strategy selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One at a time, stopping at the first error or blocking output.
    #[default]
    Sequential,
    /// All at once, waiting for every handler or the deadline.
    Concurrent,
    /// Sequential today; kept apart for output-to-input chaining.
    Pipeline,
}

impl ExecutionMode {
    /// Executor implementing this mode.
    #[must_use]
    pub fn executor(self) -> Arc<dyn Executor> {
        match self {
            Self::Sequential => Arc::new(SequentialExecutor),
            Self::Concurrent => Arc::new(ConcurrentExecutor),
            Self::Pipeline => Arc::new(PipelineExecutor),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sequential" | "sync" => Ok(Self::Sequential),
            "concurrent" | "async" => Ok(Self::Concurrent),
            "pipeline" => Ok(Self::Pipeline),
            other => Err(Error::Config(format!("unknown execution mode: {other}"))),
        }
    }
}

/// Runs handlers in registration order and stops at the first error or
/// blocking output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn execute(
        &self,
        handlers: &[Arc<dyn Handler>],
        input: &Arc<HookInput>,
        name: EventName,
        deadline: Deadline,
    ) -> Execution {
        run_in_order(handlers, input, name, deadline)
    }
}

/// Same contract as [`SequentialExecutor`].
///
/// Each event has a single input shape, so there is nothing to thread from
/// one handler's output into the next handler's input yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineExecutor;

impl Executor for PipelineExecutor {
    fn execute(
        &self,
        handlers: &[Arc<dyn Handler>],
        input: &Arc<HookInput>,
        name: EventName,
        deadline: Deadline,
    ) -> Execution {
        run_in_order(handlers, input, name, deadline)
    }
}

fn run_in_order(
    handlers: &[Arc<dyn Handler>],
    input: &HookInput,
    name: EventName,
    deadline: Deadline,
) -> Execution {
    let mut results = Vec::with_capacity(handlers.len());

    for (index, handler) in handlers.iter().enumerate() {
        if deadline.is_elapsed() {
            warn!(event = %name, index, "deadline elapsed before handler started");
            return Err(ExecutionFailure::cancelled(results, &deadline, handlers.len()));
        }

        debug!(event = %name, index, "running handler");
        let result = invoke(handler.as_ref(), input, name, index);

        if let Some(err) = result.error.clone() {
            warn!(event = %name, index, error = %err, "handler failed");
            results.push(result);
            return Err(ExecutionFailure {
                results,
                error: err.into(),
            });
        }

        let blocking = result.is_blocking();
        results.push(result);
        if blocking {
            debug!(event = %name, index, "handler blocked, skipping the rest");
            break;
        }
    }

    Ok(results)
}

/// Starts every handler on its own thread and waits for all of them or the
/// deadline, whichever comes first.
///
/// Handlers still running at the deadline are not interrupted; their late
/// results are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrentExecutor;

impl Executor for ConcurrentExecutor {
    fn execute(
        &self,
        handlers: &[Arc<dyn Handler>],
        input: &Arc<HookInput>,
        name: EventName,
        deadline: Deadline,
    ) -> Execution {
        let total = handlers.len();
        let mut slots: Vec<HandlerResult> = (0..total).map(HandlerResult::pending).collect();
        let mut outstanding = total;
        let (tx, rx) = mpsc::channel::<HandlerResult>();

        for (index, handler) in handlers.iter().enumerate() {
            let tx = tx.clone();
            let handler = Arc::clone(handler);
            let input = Arc::clone(input);
            let spawned = thread::Builder::new()
                .name(format!("hook-{name}-{index}"))
                .spawn(move || {
                    let result = invoke(handler.as_ref(), &input, name, index);
                    // The receiver is gone once the deadline has passed.
                    let _ = tx.send(result);
                });
            if let Err(e) = spawned {
                slots[index] = HandlerResult::failed(index, HandlerError::new(index, e.into()));
                outstanding -= 1;
            }
        }
        drop(tx);

        while outstanding > 0 {
            match rx.recv_timeout(deadline.remaining()) {
                Ok(result) => {
                    debug!(event = %name, index = result.index, "handler finished");
                    let index = result.index;
                    slots[index] = result;
                    outstanding -= 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(event = %name, outstanding, "deadline elapsed waiting for handlers");
                    return Err(ExecutionFailure::cancelled(slots, &deadline, total));
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(slots)
    }
}

fn invoke(
    handler: &dyn Handler,
    input: &HookInput,
    name: EventName,
    index: usize,
) -> HandlerResult {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(input, name))) {
        Ok(Ok(output)) => HandlerResult::succeeded(index, output),
        Ok(Err(e)) => HandlerResult::failed(index, HandlerError::new(index, e)),
        Err(payload) => {
            let message = format!("handler panicked: {}", panic_message(payload.as_ref()));
            HandlerResult::failed(index, HandlerError::new(index, message.into()))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
