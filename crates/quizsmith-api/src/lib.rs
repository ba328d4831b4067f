//! Quizsmith API Library
//!
//! This crate provides the HTTP handlers, error rendering and application setup for
//! the quiz generation service.

mod api_doc;
mod handlers;
mod utils;

pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
pub use utils::upload::MAX_TEXT_FIELD_BYTES;
