use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the process-wide Prometheus recorder.
///
/// Calling this twice is a no-op for the second call.
pub fn init_metrics() -> Result<(), BuildError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    // Lost race: the other handle already renders the same global recorder.
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// How a reformulation request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientUnavailable,
    ModelCallFailed,
    MalformedOutput,
    IncompleteOutput,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ClientUnavailable => "client_unavailable",
            Outcome::ModelCallFailed => "model_call_failed",
            Outcome::MalformedOutput => "malformed_output",
            Outcome::IncompleteOutput => "incomplete_output",
        }
    }
}

pub fn record_reformulation(outcome: Outcome) {
    counter!("reformulation_requests_total", "outcome" => outcome.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_snake_case() {
        assert_eq!(Outcome::ModelCallFailed.as_str(), "model_call_failed");
        assert_eq!(Outcome::Success.as_str(), "success");
    }

    #[test]
    fn recording_without_recorder_is_harmless() {
        record_reformulation(Outcome::Success);
    }
}
