//! Event names and the small enumerations carried by event payloads.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle event reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventName {
    /// A tool is about to run.
    PreToolUse,
    /// A tool has finished.
    PostToolUse,
    /// The caller emitted a notification.
    Notification,
    /// The user submitted a prompt.
    UserPromptSubmit,
    /// The main agent is about to stop.
    Stop,
    /// A subagent is about to stop.
    SubagentStop,
    /// The conversation is about to be compacted.
    PreCompact,
    /// A session started, resumed, or was cleared.
    SessionStart,
}

impl EventName {
    /// Every event, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::PreToolUse,
        Self::PostToolUse,
        Self::Notification,
        Self::UserPromptSubmit,
        Self::Stop,
        Self::SubagentStop,
        Self::PreCompact,
        Self::SessionStart,
    ];

    /// Wire name of the event.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::Notification => "Notification",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::Stop => "Stop",
            Self::SubagentStop => "SubagentStop",
            Self::PreCompact => "PreCompact",
            Self::SessionStart => "SessionStart",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::InvalidEvent(s.to_string()))
    }
}

/// Tool named in a tool-use event.
///
/// Names outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolName {
    Task,
    Bash,
    Glob,
    Grep,
    Read,
    Edit,
    MultiEdit,
    Write,
    WebFetch,
    WebSearch,
    /// Any tool not listed above (MCP tools, newer built-ins).
    Other(String),
}

impl ToolName {
    /// Wire name of the tool.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Task => "Task",
            Self::Bash => "Bash",
            Self::Glob => "Glob",
            Self::Grep => "Grep",
            Self::Read => "Read",
            Self::Edit => "Edit",
            Self::MultiEdit => "MultiEdit",
            Self::Write => "Write",
            Self::WebFetch => "WebFetch",
            Self::WebSearch => "WebSearch",
            Self::Other(name) => name,
        }
    }

    /// Whether the name is one of the built-in tools.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ToolName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Task" => Self::Task,
            "Bash" => Self::Bash,
            "Glob" => Self::Glob,
            "Grep" => Self::Grep,
            "Read" => Self::Read,
            "Edit" => Self::Edit,
            "MultiEdit" => Self::MultiEdit,
            "Write" => Self::Write,
            "WebFetch" => Self::WebFetch,
            "WebSearch" => Self::WebSearch,
            _ => Self::Other(name),
        }
    }
}

impl From<ToolName> for String {
    fn from(name: ToolName) -> Self {
        match name {
            ToolName::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What triggered a compaction.
///
/// Values outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompactTrigger {
    /// The user asked for it.
    Manual,
    /// The context window filled up.
    Auto,
    Other(String),
}

impl CompactTrigger {
    /// Wire value of the trigger.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for CompactTrigger {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => Self::Manual,
            "auto" => Self::Auto,
            _ => Self::Other(value),
        }
    }
}

impl From<CompactTrigger> for String {
    fn from(trigger: CompactTrigger) -> Self {
        match trigger {
            CompactTrigger::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CompactTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a session came to start.
///
/// Values outside the known set (`compact`, newer sources) are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionSource {
    Startup,
    Resume,
    Clear,
    Other(String),
}

impl SessionSource {
    /// Wire value of the source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Startup => "startup",
            Self::Resume => "resume",
            Self::Clear => "clear",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for SessionSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "startup" => Self::Startup,
            "resume" => Self::Resume,
            "clear" => Self::Clear,
            _ => Self::Other(value),
        }
    }
}

impl From<SessionSource> for String {
    fn from(source: SessionSource) -> Self {
        match source {
            SessionSource::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_event_name() {
        for name in EventName::ALL {
            assert_eq!(name.as_str().parse::<EventName>().unwrap(), name);
        }
    }

    #[test]
    fn parse_rejects_unknown_event() {
        let err = "PostCompact".parse::<EventName>().unwrap_err();
        assert!(matches!(err, Error::InvalidEvent(ref s) if s == "PostCompact"));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("pretooluse".parse::<EventName>().is_err());
    }

    #[test]
    fn event_name_serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_string(&EventName::UserPromptSubmit).unwrap(),
            r#""UserPromptSubmit""#
        );
    }

    #[test]
    fn tool_name_keeps_unknown_names() {
        let tool: ToolName = serde_json::from_str(r#""mcp__github__create_issue""#).unwrap();
        assert_eq!(tool, ToolName::Other("mcp__github__create_issue".to_string()));
        assert!(!tool.is_known());
        assert_eq!(
            serde_json::to_string(&tool).unwrap(),
            r#""mcp__github__create_issue""#
        );
    }

    #[test]
    fn tool_name_known_values() {
        let tool: ToolName = serde_json::from_str(r#""Bash""#).unwrap();
        assert_eq!(tool, ToolName::Bash);
        assert_eq!(tool.to_string(), "Bash");
    }

    #[test]
    fn compact_trigger_keeps_unknown() {
        let trigger: CompactTrigger = serde_json::from_str(r#""scheduled""#).unwrap();
        assert_eq!(trigger, CompactTrigger::Other("scheduled".to_string()));
        assert_eq!(serde_json::to_string(&trigger).unwrap(), r#""scheduled""#);
        assert_eq!(
            serde_json::from_str::<CompactTrigger>(r#""auto""#).unwrap(),
            CompactTrigger::Auto
        );
    }

    #[test]
    fn session_source_values() {
        assert_eq!(
            serde_json::from_str::<SessionSource>(r#""resume""#).unwrap(),
            SessionSource::Resume
        );
        assert_eq!(SessionSource::Clear.to_string(), "clear");
    }

    #[test]
    fn session_source_keeps_unknown() {
        let source: SessionSource = serde_json::from_str(r#""compact""#).unwrap();
        assert_eq!(source, SessionSource::Other("compact".to_string()));
        assert_eq!(serde_json::to_string(&source).unwrap(), r#""compact""#);
    }
}
