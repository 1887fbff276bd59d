//! Hook output types.
//!
//! Every shape carries the common `continue`/`stopReason` header. Whether an
//! output blocks is derived from its own fields by [`HookOutput::disposition`]
//! and nowhere else.

use crate::error::{Error, Result};
use crate::hooks::event::EventName;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exit status for a successful decision.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for a blocking decision.
pub const EXIT_BLOCKING: u8 = 2;

/// Whether a decision lets the caller proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisposition {
    /// Continue.
    Success,
    /// Stop the operation.
    Blocking,
}

impl ExitDisposition {
    /// Process exit status for this disposition.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => EXIT_SUCCESS,
            Self::Blocking => EXIT_BLOCKING,
        }
    }

    /// True for [`ExitDisposition::Blocking`].
    #[must_use]
    pub fn is_blocking(self) -> bool {
        self == Self::Blocking
    }
}

/// Fields shared by every output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseOutput {
    /// `false` stops the caller. Absent means continue.
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_: Option<bool>,

    /// Human-readable reason shown when stopping.
    #[serde(
        rename = "stopReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_reason: Option<String>,
}

impl BaseOutput {
    /// Header that stops the caller with `reason`.
    #[must_use]
    pub fn halt(reason: impl Into<String>) -> Self {
        Self {
            continue_: Some(false),
            stop_reason: Some(reason.into()),
        }
    }

    fn stops(&self) -> bool {
        self.continue_ == Some(false)
    }
}

/// Output for `PreToolUse`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreToolUseOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// `false` denies the tool call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_tool: Option<bool>,

    /// Replacement arguments for the tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_input: Option<Map<String, Value>>,
}

impl PreToolUseOutput {
    /// Deny the tool call and stop with `reason`.
    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            base: BaseOutput::halt(reason),
            allow_tool: Some(false),
            modified_input: None,
        }
    }
}

/// Output for `PostToolUse`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostToolUseOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// Whether the tool result should be processed further.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_result: Option<bool>,

    /// Feedback for the agent about the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Extra structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Output for `Notification`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// Whether the notification was handled.
    #[serde(default)]
    pub acknowledged: bool,

    /// Reply to the notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Extra structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Output for `UserPromptSubmit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPromptSubmitOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// `false` rejects the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_submit: Option<bool>,

    /// Replacement prompt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_prompt: Option<String>,
}

impl UserPromptSubmitOutput {
    /// Reject the prompt and stop with `reason`.
    #[must_use]
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            base: BaseOutput::halt(reason),
            allow_submit: Some(false),
            modified_prompt: None,
        }
    }
}

/// Output for `Stop`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// `false` keeps the agent running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_stop: Option<bool>,

    /// Message shown when the stop is overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Output for `SubagentStop`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubagentStopOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// `false` keeps the subagent running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_stop: Option<bool>,

    /// Message shown when the stop is overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Output for `PreCompact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreCompactOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// `false` cancels the compaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_compact: Option<bool>,

    /// Message shown about the compaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Output for `SessionStart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartOutput {
    #[serde(flatten)]
    pub base: BaseOutput,

    /// Context injected at session start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Extra structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Decision produced by a handler or by resolution.
///
/// `Base` is the event-agnostic shape used for plain allow/block decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookOutput {
    Base(BaseOutput),
    PreToolUse(PreToolUseOutput),
    PostToolUse(PostToolUseOutput),
    Notification(NotificationOutput),
    UserPromptSubmit(UserPromptSubmitOutput),
    Stop(StopOutput),
    SubagentStop(SubagentStopOutput),
    PreCompact(PreCompactOutput),
    SessionStart(SessionStartOutput),
}

impl HookOutput {
    /// Plain continue decision.
    #[must_use]
    pub fn success() -> Self {
        Self::Base(BaseOutput::default())
    }

    /// Plain stop decision with a reason.
    #[must_use]
    pub fn block(reason: impl Into<String>) -> Self {
        Self::Base(BaseOutput::halt(reason))
    }

    /// Common header of the output.
    #[must_use]
    pub fn base(&self) -> &BaseOutput {
        match self {
            Self::Base(o) => o,
            Self::PreToolUse(o) => &o.base,
            Self::PostToolUse(o) => &o.base,
            Self::Notification(o) => &o.base,
            Self::UserPromptSubmit(o) => &o.base,
            Self::Stop(o) => &o.base,
            Self::SubagentStop(o) => &o.base,
            Self::PreCompact(o) => &o.base,
            Self::SessionStart(o) => &o.base,
        }
    }

    /// Stop reason from the common header.
    #[must_use]
    pub fn stop_reason(&self) -> Option<&str> {
        self.base().stop_reason.as_deref()
    }

    /// Blocking if `continue` is explicitly false or the shape's own allow
    /// flag is explicitly false. Success otherwise.
    #[must_use]
    pub fn disposition(&self) -> ExitDisposition {
        let denied = match self {
            Self::PreToolUse(o) => o.allow_tool == Some(false),
            Self::UserPromptSubmit(o) => o.allow_submit == Some(false),
            Self::Stop(o) => o.allow_stop == Some(false),
            Self::SubagentStop(o) => o.allow_stop == Some(false),
            Self::PreCompact(o) => o.allow_compact == Some(false),
            Self::Base(_)
            | Self::PostToolUse(_)
            | Self::Notification(_)
            | Self::SessionStart(_) => false,
        };
        if denied || self.base().stops() {
            ExitDisposition::Blocking
        } else {
            ExitDisposition::Success
        }
    }

    /// Shorthand for `disposition().is_blocking()`.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.disposition().is_blocking()
    }

    /// Serialize to the wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if a payload value cannot be serialized.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<BaseOutput> for HookOutput {
    fn from(o: BaseOutput) -> Self {
        Self::Base(o)
    }
}

macro_rules! impl_from_output {
    ($($variant:ident => $shape:ty),* $(,)?) => {
        $(
            impl From<$shape> for HookOutput {
                fn from(o: $shape) -> Self {
                    Self::$variant(o)
                }
            }
        )*
    };
}

impl_from_output! {
    PreToolUse => PreToolUseOutput,
    PostToolUse => PostToolUseOutput,
    Notification => NotificationOutput,
    UserPromptSubmit => UserPromptSubmitOutput,
    Stop => StopOutput,
    SubagentStop => SubagentStopOutput,
    PreCompact => PreCompactOutput,
    SessionStart => SessionStartOutput,
}

/// Decode a wire output into the shape used by `name`.
///
/// # Errors
///
/// Returns `MalformedInput` if the JSON does not match that shape.
pub fn decode_output(raw: &[u8], name: EventName) -> Result<HookOutput> {
    Ok(match name {
        EventName::PreToolUse => HookOutput::PreToolUse(from_raw(raw)?),
        EventName::PostToolUse => HookOutput::PostToolUse(from_raw(raw)?),
        EventName::Notification => HookOutput::Notification(from_raw(raw)?),
        EventName::UserPromptSubmit => HookOutput::UserPromptSubmit(from_raw(raw)?),
        EventName::Stop => HookOutput::Stop(from_raw(raw)?),
        EventName::SubagentStop => HookOutput::SubagentStop(from_raw(raw)?),
        EventName::PreCompact => HookOutput::PreCompact(from_raw(raw)?),
        EventName::SessionStart => HookOutput::SessionStart(from_raw(raw)?),
    })
}

fn from_raw<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).map_err(Error::MalformedInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn success_serializes_empty() {
        assert_eq!(HookOutput::success().to_json().unwrap(), "{}");
        assert_eq!(HookOutput::success().disposition(), ExitDisposition::Success);
    }

    #[test]
    fn block_serialization() {
        let output = HookOutput::block("not today");
        assert_eq!(
            output.to_json().unwrap(),
            r#"{"continue":false,"stopReason":"not today"}"#
        );
        assert_eq!(output.disposition().exit_code(), EXIT_BLOCKING);
    }

    #[test]
    fn continue_true_is_success() {
        let output = HookOutput::from(BaseOutput {
            continue_: Some(true),
            stop_reason: None,
        });
        assert_eq!(output.disposition(), ExitDisposition::Success);
    }

    #[test]
    fn allow_flags_block_on_their_own() {
        let outputs: [HookOutput; 5] = [
            PreToolUseOutput {
                allow_tool: Some(false),
                ..Default::default()
            }
            .into(),
            UserPromptSubmitOutput {
                allow_submit: Some(false),
                ..Default::default()
            }
            .into(),
            StopOutput {
                allow_stop: Some(false),
                ..Default::default()
            }
            .into(),
            SubagentStopOutput {
                allow_stop: Some(false),
                ..Default::default()
            }
            .into(),
            PreCompactOutput {
                allow_compact: Some(false),
                ..Default::default()
            }
            .into(),
        ];
        for output in outputs {
            assert!(output.is_blocking(), "{output:?} should block");
        }
    }

    #[test]
    fn allow_flag_true_does_not_block() {
        let output: HookOutput = PreToolUseOutput {
            allow_tool: Some(true),
            ..Default::default()
        }
        .into();
        assert!(!output.is_blocking());
    }

    #[test]
    fn pre_tool_use_deny_serialization() {
        let json = HookOutput::from(PreToolUseOutput::deny("dangerous"))
            .to_json()
            .unwrap();
        assert!(json.contains(r#""continue":false"#));
        assert!(json.contains(r#""stopReason":"dangerous""#));
        assert!(json.contains(r#""allowTool":false"#));
        assert!(!json.contains("modifiedInput"));
    }

    #[test]
    fn notification_always_emits_acknowledged() {
        let json = HookOutput::from(NotificationOutput::default())
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"acknowledged":false}"#);
    }

    #[test]
    fn decode_output_reads_camel_case() {
        let raw = br#"{"continue":true,"allowSubmit":false,"modifiedPrompt":"x"}"#;
        let output = decode_output(raw, EventName::UserPromptSubmit).unwrap();
        let HookOutput::UserPromptSubmit(o) = &output else {
            panic!("expected UserPromptSubmit");
        };
        assert_eq!(o.modified_prompt.as_deref(), Some("x"));
        assert!(output.is_blocking());
    }

    #[test]
    fn decode_output_rejects_wrong_types() {
        let err = decode_output(br#"{"allowTool":"no"}"#, EventName::PreToolUse).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    fn any_flag() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
    }

    fn any_output() -> impl Strategy<Value = (EventName, HookOutput)> {
        (
            0..EventName::ALL.len(),
            any_flag(),
            any_flag(),
            proptest::option::of("[a-z ]{0,12}"),
        )
            .prop_map(|(i, cont, allow, reason)| {
                let base = BaseOutput {
                    continue_: cont,
                    stop_reason: reason,
                };
                let name = EventName::ALL[i];
                let output: HookOutput = match name {
                    EventName::PreToolUse => PreToolUseOutput {
                        base,
                        allow_tool: allow,
                        modified_input: None,
                    }
                    .into(),
                    EventName::PostToolUse => PostToolUseOutput {
                        base,
                        process_result: allow,
                        ..Default::default()
                    }
                    .into(),
                    EventName::Notification => NotificationOutput {
                        base,
                        acknowledged: allow.unwrap_or(false),
                        ..Default::default()
                    }
                    .into(),
                    EventName::UserPromptSubmit => UserPromptSubmitOutput {
                        base,
                        allow_submit: allow,
                        modified_prompt: None,
                    }
                    .into(),
                    EventName::Stop => StopOutput {
                        base,
                        allow_stop: allow,
                        message: None,
                    }
                    .into(),
                    EventName::SubagentStop => SubagentStopOutput {
                        base,
                        allow_stop: allow,
                        message: None,
                    }
                    .into(),
                    EventName::PreCompact => PreCompactOutput {
                        base,
                        allow_compact: allow,
                        message: None,
                    }
                    .into(),
                    EventName::SessionStart => SessionStartOutput {
                        base,
                        ..Default::default()
                    }
                    .into(),
                };
                (name, output)
            })
    }

    proptest! {
        #[test]
        fn wire_form_preserves_disposition((name, output) in any_output()) {
            let json = output.to_json().unwrap();
            let decoded = decode_output(json.as_bytes(), name).unwrap();
            prop_assert_eq!(decoded.disposition(), output.disposition());
        }
    }
}
