pub mod metrics;
pub mod parser;
pub mod prompt;
pub mod providers;

pub use parser::{parse_model_output, ModelOutput, ParseError};
pub use prompt::{build_user_message, SYSTEM_INSTRUCTION};
pub use providers::{GenerationParams, ProviderError, TextProvider};
