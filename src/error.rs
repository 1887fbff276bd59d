//! Error types for hookroute.

use crate::hooks::EventName;
use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for hookroute operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by handler implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while decoding or dispatching an event.
#[derive(Debug, Error)]
pub enum Error {
    /// The `hook_event_name` field is not one of the known events.
    #[error("invalid event name: {0}")]
    InvalidEvent(String),

    /// The payload does not decode into the shape expected for its event.
    #[error("malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// A registered handler returned an error.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// The dispatch deadline elapsed before execution finished.
    #[error("dispatch cancelled after {deadline:?}: {completed} of {total} handlers finished")]
    Cancelled {
        /// Configured deadline for the dispatch.
        deadline: Duration,
        /// Handlers that produced a result before the deadline.
        completed: usize,
        /// Handlers registered for the event.
        total: usize,
    },

    /// The custom resolution strategy was selected without a function.
    #[error("custom resolver function not provided")]
    ResolverNotProvided,

    /// An event was registered with an empty handler list.
    #[error("no handlers given for {0}")]
    EmptyRegistration(EventName),

    /// I/O error at the process boundary.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure reported by a single handler.
///
/// The source is shared so the same cause can sit in the handler's result
/// slot and still be surfaced to the router's caller.
#[derive(Debug, Clone)]
pub struct HandlerError {
    index: usize,
    source: Arc<dyn std::error::Error + Send + Sync>,
}

impl HandlerError {
    /// Wrap an error produced by the handler at `index`.
    #[must_use]
    pub fn new(index: usize, source: BoxError) -> Self {
        Self {
            index,
            source: Arc::from(source),
        }
    }

    /// Registration position of the handler that failed.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler {} failed: {}", self.index, self.source)
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn handler_error_keeps_cause() {
        let err = HandlerError::new(3, "boom".into());
        assert_eq!(err.index(), 3);
        assert_eq!(err.to_string(), "handler 3 failed: boom");
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }

    #[test]
    fn handler_error_is_transparent_in_error() {
        let err: Error = HandlerError::new(0, "denied".into()).into();
        assert_eq!(err.to_string(), "handler 0 failed: denied");
    }

    #[test]
    fn cancelled_message_reports_progress() {
        let err = Error::Cancelled {
            deadline: Duration::from_millis(50),
            completed: 1,
            total: 3,
        };
        assert!(err.to_string().contains("1 of 3"));
    }
}
