//! Blocks dangerous shell commands before they run.

use crate::error::{BoxError, Error, Result};
use crate::handler::PreToolUseHandler;
use crate::hooks::{PreToolUseInput, PreToolUseOutput, ToolName};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// `PreToolUse` guard matching `Bash` commands against a pattern list.
#[derive(Debug, Clone)]
pub struct CommandGuard {
    patterns: Vec<Regex>,
}

impl CommandGuard {
    /// Compile `patterns` as case-insensitive regexes.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the first pattern that fails to
    /// compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::Config(format!("invalid command pattern: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// First dangerous fragment found in `command`.
    #[must_use]
    pub fn find_match<'a>(&self, command: &'a str) -> Option<&'a str> {
        self.patterns
            .iter()
            .find_map(|re| re.find(command))
            .map(|m| m.as_str())
    }
}

impl PreToolUseHandler for CommandGuard {
    fn on_pre_tool_use(
        &self,
        input: &PreToolUseInput,
    ) -> std::result::Result<PreToolUseOutput, BoxError> {
        if input.tool_name != ToolName::Bash {
            return Ok(PreToolUseOutput::default());
        }
        let Some(command) = input.tool_arg("command") else {
            return Ok(PreToolUseOutput::default());
        };

        match self.find_match(command) {
            Some(fragment) => Ok(PreToolUseOutput::deny(format!(
                "Dangerous command blocked: {fragment}"
            ))),
            None => {
                debug!(command, "command allowed");
                Ok(PreToolUseOutput::default())
            }
        }
    }
}
