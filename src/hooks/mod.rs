//! Hook event model: event names, typed inputs and typed outputs.

pub mod event;
pub mod input;
pub mod output;

pub use event::{CompactTrigger, EventName, SessionSource, ToolName};
pub use input::{
    BaseInput, HookInput, NotificationInput, PostToolUseInput, PreCompactInput, PreToolUseInput,
    SessionStartInput, StopInput, SubagentStopInput, UserPromptSubmitInput, decode, decode_as,
    parse_header,
};
pub use output::{
    BaseOutput, EXIT_BLOCKING, EXIT_SUCCESS, ExitDisposition, HookOutput, NotificationOutput,
    PostToolUseOutput, PreCompactOutput, PreToolUseOutput, SessionStartOutput, StopOutput,
    SubagentStopOutput, UserPromptSubmitOutput, decode_output,
};
