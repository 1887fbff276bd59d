//! Handler contracts and the adapter that lifts narrow handlers.

pub mod adapter;
pub mod traits;

pub use adapter::{
    HandlerAdapter, adapt_notification, adapt_post_tool_use, adapt_pre_compact,
    adapt_pre_tool_use, adapt_session_start, adapt_stop, adapt_subagent_stop,
    adapt_user_prompt_submit, from_fn,
};
pub use traits::{
    Handler, NotificationHandler, PostToolUseHandler, PreCompactHandler, PreToolUseHandler,
    SessionStartHandler, StopHandler, SubagentStopHandler, UserPromptSubmitHandler,
};
