use crate::dtos::{ReformulationRequest, ReformulationResponse};
use crate::error::ReformulationError;
use crate::services::metrics::{record_reformulation, Outcome};
use crate::services::{
    build_user_message, parse_model_output, GenerationParams, SYSTEM_INSTRUCTION,
};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, Json};

/// `POST /reformular`
///
/// Builds the prompt, makes a single model call and returns the parsed
/// reformulation. `pregunta_original` is echoed back untouched.
pub async fn reformulate_question(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReformulationRequest>,
) -> Result<Json<ReformulationResponse>, ReformulationError> {
    tracing::info!(
        question_len = req.pregunta.len(),
        has_context = req.contexto.as_deref().is_some_and(|c| !c.is_empty()),
        "Reformulation requested"
    );

    let user_message = build_user_message(&req.pregunta, req.contexto.as_deref());

    let raw_text = state
        .text_provider
        .generate(
            SYSTEM_INSTRUCTION,
            &user_message,
            &GenerationParams::REFORMULATION,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Model provider call failed");
            ReformulationError::from(e)
        })?;

    let output = parse_model_output(&raw_text).map_err(|e| {
        tracing::error!(error = %e, "Model output rejected");
        ReformulationError::from(e)
    })?;

    record_reformulation(Outcome::Success);

    Ok(Json(ReformulationResponse {
        pregunta_original: req.pregunta,
        pregunta_reformulada: output.reformulated_question,
        explicacion: output.brief_explanation,
    }))
}
