//! Bundled handlers and the router the `hookroute` binary runs.

pub mod audit;
pub mod command_guard;
pub mod prompt_filter;

pub use audit::AuditLog;
pub use command_guard::CommandGuard;
pub use prompt_filter::PromptFilter;

use crate::config::Config;
use crate::error::Result;
use crate::handler::{
    NotificationHandler, PostToolUseHandler, PreToolUseHandler, SessionStartHandler, StopHandler,
    SubagentStopHandler, UserPromptSubmitHandler,
};
use crate::router::Router;
use std::sync::Arc;

/// Build a router wired with the bundled handlers enabled in `config`.
///
/// On `PreToolUse` the command guard runs before the audit log, so under
/// sequential execution a blocked command is not audited as requested.
///
/// # Errors
///
/// Returns a `Config` error for an invalid guard pattern or timeout.
pub fn router_from_config(config: &Config) -> Result<Router> {
    let mut builder = Router::builder()
        .execution(config.router.execution)
        .resolution(config.router.resolution)
        .timeout(config.router.timeout());

    let mut pre_tool_use: Vec<Arc<dyn PreToolUseHandler>> = Vec::new();
    let mut prompt: Vec<Arc<dyn UserPromptSubmitHandler>> = Vec::new();

    if config.guards.command.enabled {
        pre_tool_use.push(Arc::new(CommandGuard::new(&config.guards.command.patterns)?));
    }
    if config.guards.prompt.enabled {
        prompt.push(Arc::new(PromptFilter::new(&config.guards.prompt.blocked_terms)));
    }

    if config.audit.enabled {
        let audit = Arc::new(AuditLog);
        pre_tool_use.push(audit.clone());
        builder = builder
            .on_post_tool_use([audit.clone() as Arc<dyn PostToolUseHandler>])
            .on_notification([audit.clone() as Arc<dyn NotificationHandler>])
            .on_session_start([audit.clone() as Arc<dyn SessionStartHandler>])
            .on_stop([audit.clone() as Arc<dyn StopHandler>])
            .on_subagent_stop([audit as Arc<dyn SubagentStopHandler>]);
    }

    if !pre_tool_use.is_empty() {
        builder = builder.on_pre_tool_use(pre_tool_use);
    }
    if !prompt.is_empty() {
        builder = builder.on_user_prompt_submit(prompt);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::hooks::{EventName, ExitDisposition};

    #[test]
    fn default_config_wires_everything() {
        let router = router_from_config(&Config::default()).unwrap();
        assert_eq!(router.handler_count(EventName::PreToolUse), 2);
        assert_eq!(router.handler_count(EventName::UserPromptSubmit), 1);
        assert_eq!(router.handler_count(EventName::Stop), 1);
        assert_eq!(router.handler_count(EventName::PreCompact), 0);
    }

    #[test]
    fn disabled_handlers_are_not_registered() {
        let mut config = Config::default();
        config.guards.command.enabled = false;
        config.guards.prompt.enabled = false;
        config.audit.enabled = false;
        let router = router_from_config(&config).unwrap();
        for name in EventName::ALL {
            assert_eq!(router.handler_count(name), 0, "{name}");
        }
    }

    #[test]
    fn bad_pattern_fails_build() {
        let mut config = Config::default();
        config.guards.command.patterns = vec!["[".to_string()];
        assert!(matches!(router_from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn prompt_filter_blocks_through_router() {
        let router = router_from_config(&Config::default()).unwrap();
        let raw = br#"{"session_id":"s1","transcript_path":"t","cwd":"/","hook_event_name":"UserPromptSubmit","prompt":"my password is hunter2"}"#;
        let mut out = Vec::new();
        let disposition = router.run_with_io(&raw[..], &mut out).unwrap();
        assert_eq!(disposition, ExitDisposition::Blocking);
        assert!(String::from_utf8(out).unwrap().contains(r#""allowSubmit":false"#));
    }
}
