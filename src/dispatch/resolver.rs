//! Resolution strategies: collapsing per-handler results into one decision.
//!
//! Every strategy returns a plain success for an empty result list and
//! surfaces the lowest-index handler error before looking at any output.

use crate::dispatch::executor::HandlerResult;
use crate::error::{Error, Result};
use crate::hooks::HookOutput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Collapses ordered handler results into one decision.
pub trait Resolver: Send + Sync {
    /// # Errors
    ///
    /// Returns the first handler error found, or a strategy-specific error.
    fn resolve(&self, results: Vec<HandlerResult>) -> Result<HookOutput>;
}

/// Resolution strategy selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// The first blocking output wins; otherwise the last output.
    #[default]
    BlockWins,
    /// The first output wins.
    FirstWin,
    /// Blocking wins; otherwise the first output.
    Merge,
}

impl ResolutionMode {
    /// Resolver implementing this mode.
    #[must_use]
    pub fn resolver(self) -> Arc<dyn Resolver> {
        match self {
            Self::BlockWins => Arc::new(BlockWins),
            Self::FirstWin => Arc::new(FirstWin),
            Self::Merge => Arc::new(Merge),
        }
    }
}

impl FromStr for ResolutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "block-wins" | "block-any" => Ok(Self::BlockWins),
            "first-win" => Ok(Self::FirstWin),
            "merge" => Ok(Self::Merge),
            other => Err(Error::Config(format!("unknown resolution mode: {other}"))),
        }
    }
}

fn first_error(results: &[HandlerResult]) -> Result<()> {
    match results.iter().find_map(|r| r.error.clone()) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn first_blocking(
    results: Vec<HandlerResult>,
) -> std::result::Result<HookOutput, Vec<HandlerResult>> {
    match results.iter().position(HandlerResult::is_blocking) {
        Some(pos) => Ok(results
            .into_iter()
            .nth(pos)
            .and_then(|r| r.output)
            .unwrap_or_else(HookOutput::success)),
        None => Err(results),
    }
}

fn first_output(results: Vec<HandlerResult>) -> HookOutput {
    results
        .into_iter()
        .find_map(|r| r.output)
        .unwrap_or_else(HookOutput::success)
}

/// Any blocking output wins, in index order. Without one, the output of the
/// highest-index handler that produced one is the decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockWins;

impl Resolver for BlockWins {
    fn resolve(&self, results: Vec<HandlerResult>) -> Result<HookOutput> {
        first_error(&results)?;
        match first_blocking(results) {
            Ok(blocking) => Ok(blocking),
            Err(results) => Ok(results
                .into_iter()
                .rev()
                .find_map(|r| r.output)
                .unwrap_or_else(HookOutput::success)),
        }
    }
}

/// The lowest-index output is the decision, blocking or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstWin;

impl Resolver for FirstWin {
    fn resolve(&self, results: Vec<HandlerResult>) -> Result<HookOutput> {
        first_error(&results)?;
        Ok(first_output(results))
    }
}

/// Blocking outputs take precedence; otherwise the first output is kept.
///
/// Outputs of different shapes carry different fields, so no field-level
/// combination happens here. A caller that needs one can plug it in through
/// [`CustomResolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Merge;

impl Resolver for Merge {
    fn resolve(&self, results: Vec<HandlerResult>) -> Result<HookOutput> {
        first_error(&results)?;
        Ok(first_blocking(results).unwrap_or_else(first_output))
    }
}

/// Resolution function supplied by the caller.
pub type ResolveFn = dyn Fn(Vec<HandlerResult>) -> Result<HookOutput> + Send + Sync;

/// Delegates to a caller-supplied function.
#[derive(Clone, Default)]
pub struct CustomResolver {
    func: Option<Arc<ResolveFn>>,
}

impl CustomResolver {
    /// Resolver backed by `func`.
    #[must_use]
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Vec<HandlerResult>) -> Result<HookOutput> + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(func)),
        }
    }

    /// Resolver with no function; resolving fails with `ResolverNotProvided`.
    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }
}

impl fmt::Debug for CustomResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomResolver")
            .field("func", &self.func.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Resolver for CustomResolver {
    fn resolve(&self, results: Vec<HandlerResult>) -> Result<HookOutput> {
        let func = self.func.as_ref().ok_or(Error::ResolverNotProvided)?;
        func(results)
    }
}
