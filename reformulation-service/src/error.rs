//! Failures of the reformulation pipeline and their HTTP mapping.

use crate::services::metrics::{record_reformulation, Outcome};
use crate::services::{ParseError, ProviderError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReformulationError {
    #[error("model client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("model call failed: {0}")]
    ModelCall(String),

    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    #[error("incomplete model output: {0}")]
    IncompleteOutput(String),
}

impl ReformulationError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReformulationError::ModelCall(_) => StatusCode::BAD_GATEWAY,
            ReformulationError::ClientUnavailable(_)
            | ReformulationError::MalformedOutput(_)
            | ReformulationError::IncompleteOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed message returned to the caller. Never includes the cause.
    pub fn detail(&self) -> &'static str {
        match self {
            ReformulationError::ClientUnavailable(_) => {
                "No se pudo inicializar el cliente de OpenAI. Verifica la variable de entorno OPENAI_API_KEY."
            }
            ReformulationError::ModelCall(_) => {
                "No se pudo obtener una reformulación en este momento. Intenta nuevamente."
            }
            ReformulationError::MalformedOutput(_) => {
                "El modelo no devolvió un formato válido. Intenta nuevamente."
            }
            ReformulationError::IncompleteOutput(_) => {
                "La respuesta del modelo no incluyó la información requerida."
            }
        }
    }

    fn outcome(&self) -> Outcome {
        match self {
            ReformulationError::ClientUnavailable(_) => Outcome::ClientUnavailable,
            ReformulationError::ModelCall(_) => Outcome::ModelCallFailed,
            ReformulationError::MalformedOutput(_) => Outcome::MalformedOutput,
            ReformulationError::IncompleteOutput(_) => Outcome::IncompleteOutput,
        }
    }
}

impl From<ProviderError> for ReformulationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable(reason) => ReformulationError::ClientUnavailable(reason),
            ProviderError::CallFailed(reason) => ReformulationError::ModelCall(reason),
        }
    }
}

impl From<ParseError> for ReformulationError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Malformed(e) => ReformulationError::MalformedOutput(e.to_string()),
            ParseError::Incomplete(body) => ReformulationError::IncompleteOutput(body),
        }
    }
}

impl IntoResponse for ReformulationError {
    fn into_response(self) -> Response {
        record_reformulation(self.outcome());
        ErrorResponse::new(self.detail()).into_response_with(self.status())
    }
}
