//! Question reformulation service.
//!
//! `POST /reformular` rewrites a user's question through an LLM provider and
//! returns the clarified wording with a short explanation of the changes.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{build_router, AppState, Application};
