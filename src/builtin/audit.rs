//! Audit trail for tool use and session lifecycle events.
//!
//! Records go to the `hookroute::audit` tracing target. The audit handler
//! never blocks.

use crate::error::BoxError;
use crate::handler::{
    NotificationHandler, PostToolUseHandler, PreToolUseHandler, SessionStartHandler,
    StopHandler, SubagentStopHandler,
};
use crate::hooks::{
    NotificationInput, NotificationOutput, PostToolUseInput, PostToolUseOutput, PreToolUseInput,
    PreToolUseOutput, SessionStartInput, SessionStartOutput, StopInput, StopOutput,
    SubagentStopInput, SubagentStopOutput,
};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLog;

impl PreToolUseHandler for AuditLog {
    fn on_pre_tool_use(&self, input: &PreToolUseInput) -> Result<PreToolUseOutput, BoxError> {
        info!(
            target: "hookroute::audit",
            session = %input.base.session_id,
            tool = %input.tool_name,
            "tool requested"
        );
        Ok(PreToolUseOutput::default())
    }
}

impl PostToolUseHandler for AuditLog {
    fn on_post_tool_use(&self, input: &PostToolUseInput) -> Result<PostToolUseOutput, BoxError> {
        info!(
            target: "hookroute::audit",
            session = %input.base.session_id,
            tool = %input.tool_name,
            "tool completed"
        );
        Ok(PostToolUseOutput::default())
    }
}

impl NotificationHandler for AuditLog {
    fn on_notification(
        &self,
        input: &NotificationInput,
    ) -> Result<NotificationOutput, BoxError> {
        info!(
            target: "hookroute::audit",
            session = %input.base.session_id,
            message = %input.message,
            "notification"
        );
        Ok(NotificationOutput {
            acknowledged: true,
            ..Default::default()
        })
    }
}

impl SessionStartHandler for AuditLog {
    fn on_session_start(
        &self,
        input: &SessionStartInput,
    ) -> Result<SessionStartOutput, BoxError> {
        info!(
            target: "hookroute::audit",
            session = %input.base.session_id,
            source = %input.source,
            cwd = %input.base.cwd.display(),
            "session started"
        );
        Ok(SessionStartOutput::default())
    }
}

impl StopHandler for AuditLog {
    fn on_stop(&self, input: &StopInput) -> Result<StopOutput, BoxError> {
        info!(
            target: "hookroute::audit",
            session = %input.base.session_id,
            stop_hook_active = input.stop_hook_active,
            "agent stopping"
        );
        Ok(StopOutput::default())
    }
}

impl SubagentStopHandler for AuditLog {
    fn on_subagent_stop(
        &self,
        input: &SubagentStopInput,
    ) -> Result<SubagentStopOutput, BoxError> {
        info!(
            target: "hookroute::audit",
            session = %input.base.session_id,
            stop_hook_active = input.stop_hook_active,
            "subagent stopping"
        );
        Ok(SubagentStopOutput::default())
    }
}
