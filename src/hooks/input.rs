//! Hook input parsing.

use crate::error::{Error, Result};
use crate::hooks::event::{CompactTrigger, EventName, SessionSource, ToolName};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Fields shared by every event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseInput {
    /// Session identifier.
    pub session_id: String,

    /// Location of the conversation transcript.
    pub transcript_path: PathBuf,

    /// Working directory of the caller.
    pub cwd: PathBuf,

    /// Event name exactly as the caller sent it.
    pub hook_event_name: String,
}

/// Input for `PreToolUse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreToolUseInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// Tool about to run.
    pub tool_name: ToolName,

    /// Arguments the tool will receive.
    #[serde(default)]
    pub tool_input: Map<String, Value>,
}

impl PreToolUseInput {
    /// String argument of the tool input, if present.
    #[must_use]
    pub fn tool_arg(&self, key: &str) -> Option<&str> {
        self.tool_input.get(key).and_then(Value::as_str)
    }
}

/// Input for `PostToolUse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostToolUseInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// Tool that ran.
    pub tool_name: ToolName,

    /// Arguments the tool received.
    #[serde(default)]
    pub tool_input: Map<String, Value>,

    /// Whatever the tool returned.
    #[serde(default)]
    pub tool_response: Value,
}

/// Input for `Notification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// Notification text.
    pub message: String,
}

/// Input for `UserPromptSubmit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPromptSubmitInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// Prompt text as submitted.
    pub prompt: String,
}

/// Input for `Stop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// True when the agent is already continuing because of a stop hook.
    #[serde(default)]
    pub stop_hook_active: bool,
}

/// Input for `SubagentStop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubagentStopInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// True when the subagent is already continuing because of a stop hook.
    #[serde(default)]
    pub stop_hook_active: bool,
}

/// Input for `PreCompact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreCompactInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// Manual or automatic compaction.
    pub trigger: CompactTrigger,

    /// Instructions the user passed to a manual compaction.
    #[serde(default)]
    pub custom_instructions: String,
}

/// Input for `SessionStart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStartInput {
    #[serde(flatten)]
    pub base: BaseInput,

    /// Why the session started.
    pub source: SessionSource,
}

/// Decoded event payload, one variant per event.
#[derive(Debug, Clone, PartialEq)]
pub enum HookInput {
    PreToolUse(PreToolUseInput),
    PostToolUse(PostToolUseInput),
    Notification(NotificationInput),
    UserPromptSubmit(UserPromptSubmitInput),
    Stop(StopInput),
    SubagentStop(SubagentStopInput),
    PreCompact(PreCompactInput),
    SessionStart(SessionStartInput),
}

impl HookInput {
    /// Event this payload belongs to.
    #[must_use]
    pub fn event_name(&self) -> EventName {
        match self {
            Self::PreToolUse(_) => EventName::PreToolUse,
            Self::PostToolUse(_) => EventName::PostToolUse,
            Self::Notification(_) => EventName::Notification,
            Self::UserPromptSubmit(_) => EventName::UserPromptSubmit,
            Self::Stop(_) => EventName::Stop,
            Self::SubagentStop(_) => EventName::SubagentStop,
            Self::PreCompact(_) => EventName::PreCompact,
            Self::SessionStart(_) => EventName::SessionStart,
        }
    }

    /// Common header of the payload.
    #[must_use]
    pub fn base(&self) -> &BaseInput {
        match self {
            Self::PreToolUse(i) => &i.base,
            Self::PostToolUse(i) => &i.base,
            Self::Notification(i) => &i.base,
            Self::UserPromptSubmit(i) => &i.base,
            Self::Stop(i) => &i.base,
            Self::SubagentStop(i) => &i.base,
            Self::PreCompact(i) => &i.base,
            Self::SessionStart(i) => &i.base,
        }
    }

    /// Session identifier from the common header.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.base().session_id
    }
}

#[derive(Deserialize)]
struct EventHeader {
    hook_event_name: Option<String>,
}

/// Read the event name out of a raw payload.
///
/// # Errors
///
/// Returns `MalformedInput` if the payload is not a JSON object and
/// `InvalidEvent` if the event name is missing or unknown.
pub fn parse_header(raw: &[u8]) -> Result<EventName> {
    let header: EventHeader = serde_json::from_slice(raw).map_err(Error::MalformedInput)?;
    header.hook_event_name.unwrap_or_default().parse()
}

/// Decode a raw payload, taking the event from its own header.
///
/// # Errors
///
/// Fails like [`parse_header`] and [`decode_as`].
pub fn decode(raw: &[u8]) -> Result<HookInput> {
    let name = parse_header(raw)?;
    decode_as(raw, name)
}

/// Decode a raw payload into the shape expected for `name`.
///
/// # Errors
///
/// Returns `MalformedInput` if the payload does not match that shape.
pub fn decode_as(raw: &[u8], name: EventName) -> Result<HookInput> {
    Ok(match name {
        EventName::PreToolUse => HookInput::PreToolUse(from_raw(raw)?),
        EventName::PostToolUse => HookInput::PostToolUse(from_raw(raw)?),
        EventName::Notification => HookInput::Notification(from_raw(raw)?),
        EventName::UserPromptSubmit => HookInput::UserPromptSubmit(from_raw(raw)?),
        EventName::Stop => HookInput::Stop(from_raw(raw)?),
        EventName::SubagentStop => HookInput::SubagentStop(from_raw(raw)?),
        EventName::PreCompact => HookInput::PreCompact(from_raw(raw)?),
        EventName::SessionStart => HookInput::SessionStart(from_raw(raw)?),
    })
}

fn from_raw<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).map_err(Error::MalformedInput)
}
