//! Handler contracts.
//!
//! [`Handler`] is the uniform contract the router works with. The narrow
//! per-event traits let an implementer deal with a single input shape; the
//! adapter in [`crate::handler::adapter`] lifts them into [`Handler`].

use crate::error::BoxError;
use crate::hooks::{
    EventName, HookInput, HookOutput, NotificationInput, NotificationOutput, PostToolUseInput,
    PostToolUseOutput, PreCompactInput, PreCompactOutput, PreToolUseInput, PreToolUseOutput,
    SessionStartInput, SessionStartOutput, StopInput, StopOutput, SubagentStopInput,
    SubagentStopOutput, UserPromptSubmitInput, UserPromptSubmitOutput,
};

/// Uniform handler invoked for any event.
pub trait Handler: Send + Sync {
    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn handle(&self, input: &HookInput, name: EventName) -> Result<HookOutput, BoxError>;
}

impl<F> Handler for F
where
    F: Fn(&HookInput, EventName) -> Result<HookOutput, BoxError> + Send + Sync,
{
    fn handle(&self, input: &HookInput, name: EventName) -> Result<HookOutput, BoxError> {
        self(input, name)
    }
}

/// Handles `PreToolUse` only.
pub trait PreToolUseHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_pre_tool_use(&self, input: &PreToolUseInput) -> Result<PreToolUseOutput, BoxError>;
}

/// Handles `PostToolUse` only.
pub trait PostToolUseHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_post_tool_use(&self, input: &PostToolUseInput) -> Result<PostToolUseOutput, BoxError>;
}

/// Handles `Notification` only.
pub trait NotificationHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_notification(&self, input: &NotificationInput)
    -> Result<NotificationOutput, BoxError>;
}

/// Handles `UserPromptSubmit` only.
pub trait UserPromptSubmitHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_user_prompt_submit(
        &self,
        input: &UserPromptSubmitInput,
    ) -> Result<UserPromptSubmitOutput, BoxError>;
}

/// Handles `Stop` only.
pub trait StopHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_stop(&self, input: &StopInput) -> Result<StopOutput, BoxError>;
}

/// Handles `SubagentStop` only.
pub trait SubagentStopHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_subagent_stop(&self, input: &SubagentStopInput)
    -> Result<SubagentStopOutput, BoxError>;
}

/// Handles `PreCompact` only.
pub trait PreCompactHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_pre_compact(&self, input: &PreCompactInput) -> Result<PreCompactOutput, BoxError>;
}

/// Handles `SessionStart` only.
pub trait SessionStartHandler: Send + Sync {
    /// # Errors
    ///
    /// Any error ends the dispatch of the current event.
    fn on_session_start(&self, input: &SessionStartInput)
    -> Result<SessionStartOutput, BoxError>;
}
