//! Placeholder provider used when no credential was configured at startup.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;

/// Fails every call immediately, without touching the network.
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TextProvider for UnavailableProvider {
    async fn generate(
        &self,
        _system_instruction: &str,
        _user_message: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable(self.reason.clone()))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Err(ProviderError::Unavailable(self.reason.clone()))
    }
}
