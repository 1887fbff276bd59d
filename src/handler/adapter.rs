//! Lifting narrow per-event handlers into the uniform [`Handler`] contract.

use crate::error::BoxError;
use crate::handler::traits::{
    Handler, NotificationHandler, PostToolUseHandler, PreCompactHandler, PreToolUseHandler,
    SessionStartHandler, StopHandler, SubagentStopHandler, UserPromptSubmitHandler,
};
use crate::hooks::{EventName, HookInput, HookOutput};
use std::sync::Arc;

/// Holds at most one narrow handler per event.
///
/// Events without a narrow handler resolve to a plain success, so a handler
/// that ignores an event is transparent rather than an error.
#[derive(Clone, Default)]
pub struct HandlerAdapter {
    pub pre_tool_use: Option<Arc<dyn PreToolUseHandler>>,
    pub post_tool_use: Option<Arc<dyn PostToolUseHandler>>,
    pub notification: Option<Arc<dyn NotificationHandler>>,
    pub user_prompt_submit: Option<Arc<dyn UserPromptSubmitHandler>>,
    pub stop: Option<Arc<dyn StopHandler>>,
    pub subagent_stop: Option<Arc<dyn SubagentStopHandler>>,
    pub pre_compact: Option<Arc<dyn PreCompactHandler>>,
    pub session_start: Option<Arc<dyn SessionStartHandler>>,
}

impl HandlerAdapter {
    /// Adapter with no narrow handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pre_tool_use(mut self, h: Arc<dyn PreToolUseHandler>) -> Self {
        self.pre_tool_use = Some(h);
        self
    }

    #[must_use]
    pub fn with_post_tool_use(mut self, h: Arc<dyn PostToolUseHandler>) -> Self {
        self.post_tool_use = Some(h);
        self
    }

    #[must_use]
    pub fn with_notification(mut self, h: Arc<dyn NotificationHandler>) -> Self {
        self.notification = Some(h);
        self
    }

    #[must_use]
    pub fn with_user_prompt_submit(mut self, h: Arc<dyn UserPromptSubmitHandler>) -> Self {
        self.user_prompt_submit = Some(h);
        self
    }

    #[must_use]
    pub fn with_stop(mut self, h: Arc<dyn StopHandler>) -> Self {
        self.stop = Some(h);
        self
    }

    #[must_use]
    pub fn with_subagent_stop(mut self, h: Arc<dyn SubagentStopHandler>) -> Self {
        self.subagent_stop = Some(h);
        self
    }

    #[must_use]
    pub fn with_pre_compact(mut self, h: Arc<dyn PreCompactHandler>) -> Self {
        self.pre_compact = Some(h);
        self
    }

    #[must_use]
    pub fn with_session_start(mut self, h: Arc<dyn SessionStartHandler>) -> Self {
        self.session_start = Some(h);
        self
    }

    /// Events this adapter has a narrow handler for.
    #[must_use]
    pub fn events(&self) -> Vec<EventName> {
        EventName::ALL
            .into_iter()
            .filter(|name| self.supports(*name))
            .collect()
    }

    /// Whether a narrow handler is set for `name`.
    #[must_use]
    pub fn supports(&self, name: EventName) -> bool {
        match name {
            EventName::PreToolUse => self.pre_tool_use.is_some(),
            EventName::PostToolUse => self.post_tool_use.is_some(),
            EventName::Notification => self.notification.is_some(),
            EventName::UserPromptSubmit => self.user_prompt_submit.is_some(),
            EventName::Stop => self.stop.is_some(),
            EventName::SubagentStop => self.subagent_stop.is_some(),
            EventName::PreCompact => self.pre_compact.is_some(),
            EventName::SessionStart => self.session_start.is_some(),
        }
    }
}

impl Handler for HandlerAdapter {
    fn handle(&self, input: &HookInput, name: EventName) -> Result<HookOutput, BoxError> {
        let output = match (name, input) {
            (EventName::PreToolUse, HookInput::PreToolUse(i)) => match &self.pre_tool_use {
                Some(h) => h.on_pre_tool_use(i)?.into(),
                None => HookOutput::success(),
            },
            (EventName::PostToolUse, HookInput::PostToolUse(i)) => match &self.post_tool_use {
                Some(h) => h.on_post_tool_use(i)?.into(),
                None => HookOutput::success(),
            },
            (EventName::Notification, HookInput::Notification(i)) => match &self.notification {
                Some(h) => h.on_notification(i)?.into(),
                None => HookOutput::success(),
            },
            (EventName::UserPromptSubmit, HookInput::UserPromptSubmit(i)) => {
                match &self.user_prompt_submit {
                    Some(h) => h.on_user_prompt_submit(i)?.into(),
                    None => HookOutput::success(),
                }
            }
            (EventName::Stop, HookInput::Stop(i)) => match &self.stop {
                Some(h) => h.on_stop(i)?.into(),
                None => HookOutput::success(),
            },
            (EventName::SubagentStop, HookInput::SubagentStop(i)) => match &self.subagent_stop {
                Some(h) => h.on_subagent_stop(i)?.into(),
                None => HookOutput::success(),
            },
            (EventName::PreCompact, HookInput::PreCompact(i)) => match &self.pre_compact {
                Some(h) => h.on_pre_compact(i)?.into(),
                None => HookOutput::success(),
            },
            (EventName::SessionStart, HookInput::SessionStart(i)) => match &self.session_start {
                Some(h) => h.on_session_start(i)?.into(),
                None => HookOutput::success(),
            },
            // Event name and payload disagree: nothing to forward to.
            _ => HookOutput::success(),
        };
        Ok(output)
    }
}

/// Wrap a closure as a shared [`Handler`].
pub fn from_fn<F>(f: F) -> Arc<dyn Handler>
where
    F: Fn(&HookInput, EventName) -> Result<HookOutput, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn adapt_pre_tool_use(h: Arc<dyn PreToolUseHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_pre_tool_use(h))
}

pub fn adapt_post_tool_use(h: Arc<dyn PostToolUseHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_post_tool_use(h))
}

pub fn adapt_notification(h: Arc<dyn NotificationHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_notification(h))
}

pub fn adapt_user_prompt_submit(h: Arc<dyn UserPromptSubmitHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_user_prompt_submit(h))
}

pub fn adapt_stop(h: Arc<dyn StopHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_stop(h))
}

pub fn adapt_subagent_stop(h: Arc<dyn SubagentStopHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_subagent_stop(h))
}

pub fn adapt_pre_compact(h: Arc<dyn PreCompactHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_pre_compact(h))
}

pub fn adapt_session_start(h: Arc<dyn SessionStartHandler>) -> Arc<dyn Handler> {
    Arc::new(HandlerAdapter::new().with_session_start(h))
}
