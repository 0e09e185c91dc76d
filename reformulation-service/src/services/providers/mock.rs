//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Failure(String),
}

/// One call as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system_instruction: String,
    pub user_message: String,
    pub params: GenerationParams,
}

/// Mock text provider for testing.
///
/// Returns a fixed reply and records every call it receives.
pub struct MockTextProvider {
    reply: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the given raw text.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Fail every call as if the provider could not be reached.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(MockReply::Failure(reason.into()))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                system_instruction: system_instruction.to_string(),
                user_message: user_message.to_string(),
                params: *params,
            });
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Failure(reason) => Err(ProviderError::CallFailed(reason.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
