//! hookroute - typed event router for agent lifecycle hooks.
//!
//! Decodes a hook payload, fans it out to the handlers registered for its
//! event and reduces their outputs to one decision plus an exit status.

pub mod builtin;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod hooks;
pub mod router;

pub use config::Config;
pub use dispatch::{CustomResolver, Deadline, ExecutionMode, HandlerResult, ResolutionMode};
pub use error::{BoxError, Error, HandlerError, Result};
pub use handler::{Handler, HandlerAdapter, from_fn};
pub use hooks::{EventName, ExitDisposition, HookInput, HookOutput};
pub use router::{Router, RouterBuilder};
