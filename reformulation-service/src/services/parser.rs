//! Interpretation of the model's raw text reply.
//!
//! Parsing happens in two stages that must stay distinguishable: the text has
//! to be JSON at all ([`ParseError::Malformed`]), and then it has to carry both
//! expected fields with usable values ([`ParseError::Incomplete`]).

use serde_json::Value;
use thiserror::Error;

pub const REFORMULATED_KEY: &str = "pregunta_reformulada";
pub const EXPLANATION_KEY: &str = "explicacion_breve";

/// Structured model output. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOutput {
    pub reformulated_question: String,
    pub brief_explanation: String,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("model output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model output lacks required fields: {0}")]
    Incomplete(String),
}

/// Parse raw model text into a [`ModelOutput`].
pub fn parse_model_output(raw_text: &str) -> Result<ModelOutput, ParseError> {
    let body: Value = serde_json::from_str(raw_text)?;

    let reformulated_question = required_text(&body, REFORMULATED_KEY);
    let brief_explanation = required_text(&body, EXPLANATION_KEY);

    match (reformulated_question, brief_explanation) {
        (Some(reformulated_question), Some(brief_explanation)) => Ok(ModelOutput {
            reformulated_question: reformulated_question.to_string(),
            brief_explanation: brief_explanation.to_string(),
        }),
        _ => Err(ParseError::Incomplete(body.to_string())),
    }
}

/// A field counts as present only when it is a non-empty string.
///
/// Missing keys, `null`, empty strings and non-string values are all absent,
/// as is any field looked up on a non-object document.
fn required_text<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
