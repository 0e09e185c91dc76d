//! Prompt templates for question reformulation.

/// Fixed directive defining the model's role and output shape.
pub const SYSTEM_INSTRUCTION: &str = "Eres un asistente especializado en reinterpretar y reformular preguntas de usuarios en español. \
Tu tarea es clarificar la intención, eliminar ambigüedades, completar el contexto mínimo si es necesario \
y devolver únicamente una versión reformulada de la pregunta. Nunca respondas la pregunta, solo reescríbela \
en un español claro, neutral y conciso. Devuelve también una breve explicación de los ajustes realizados. \
Responde siempre en formato JSON con las claves 'pregunta_reformulada' y 'explicacion_breve'.";

const INSTRUCTION_LINE: &str =
    "Reformula la siguiente pregunta manteniendo la intención original y sin responderla:";

/// Assemble the per-request user message.
///
/// The context line is added only when `context` is present and non-empty.
/// Values are interpolated as-is.
pub fn build_user_message(question: &str, context: Option<&str>) -> String {
    let mut lines = vec![
        INSTRUCTION_LINE.to_string(),
        format!("Pregunta: {}", question),
    ];

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        lines.push(format!("Contexto adicional: {}", context));
    }

    lines.join("\n")
}
