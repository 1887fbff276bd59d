//! Rejects prompts that mention sensitive material.

use crate::error::BoxError;
use crate::handler::UserPromptSubmitHandler;
use crate::hooks::{UserPromptSubmitInput, UserPromptSubmitOutput};

/// `UserPromptSubmit` guard rejecting prompts that contain a blocked term.
#[derive(Debug, Clone)]
pub struct PromptFilter {
    terms: Vec<String>,
}

impl PromptFilter {
    /// Filter for `terms`, matched case-insensitively.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// First blocked term contained in `prompt`.
    #[must_use]
    pub fn find_term(&self, prompt: &str) -> Option<&str> {
        let prompt = prompt.to_lowercase();
        self.terms
            .iter()
            .find(|term| prompt.contains(term.as_str()))
            .map(String::as_str)
    }
}

impl UserPromptSubmitHandler for PromptFilter {
    fn on_user_prompt_submit(
        &self,
        input: &UserPromptSubmitInput,
    ) -> Result<UserPromptSubmitOutput, BoxError> {
        Ok(match self.find_term(&input.prompt) {
            Some(term) => {
                UserPromptSubmitOutput::reject(format!("Blocked sensitive content: {term}"))
            }
            None => UserPromptSubmitOutput::default(),
        })
    }
}
