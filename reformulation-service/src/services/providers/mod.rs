//! Model provider abstraction and implementations.
//!
//! Handlers talk to an `Arc<dyn TextProvider>` held in `AppState`, so the
//! OpenAI client, the unavailable placeholder and the test mock are
//! interchangeable.

pub mod mock;
pub mod openai;
pub mod unavailable;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
///
/// Transport, authentication, rate-limit and upstream failures are not told
/// apart: callers treat all of them as one retryable condition.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Model call failed: {0}")]
    CallFailed(String),
}

/// Generation parameters for a single model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: f32,

    /// Maximum output tokens.
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Settings used for question reformulation.
    pub const REFORMULATION: GenerationParams = GenerationParams {
        temperature: 0.3,
        max_tokens: 200,
    };
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one system and one user message, returning the raw text reply.
    async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    /// Report whether the provider can serve requests. Makes no network call.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
