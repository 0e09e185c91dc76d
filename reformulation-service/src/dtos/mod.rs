use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /reformular`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReformulationRequest {
    #[validate(length(min = 1, message = "La pregunta no puede estar vacía"))]
    pub pregunta: String,

    #[serde(default)]
    pub contexto: Option<String>,
}

/// Successful reply of `POST /reformular`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReformulationResponse {
    /// The question exactly as received.
    pub pregunta_original: String,
    pub pregunta_reformulada: String,
    pub explicacion: String,
}
