//! Running handlers and reducing their results.

pub mod executor;
pub mod resolver;

pub use executor::{
    ConcurrentExecutor, DEFAULT_TIMEOUT, Deadline, Execution, ExecutionFailure, ExecutionMode,
    Executor, HandlerResult, PipelineExecutor, SequentialExecutor,
};
pub use resolver::{
    BlockWins, CustomResolver, FirstWin, Merge, ResolutionMode, ResolveFn, Resolver,
};
