//! HTTP handlers for the reformulation service.

pub mod health;
pub mod metrics;
pub mod reformulate;

pub use health::{health_check, readiness_check};
pub use metrics::metrics;
pub use reformulate::reformulate_question;
