//! HTTP surface of the trivia service.
//!
//! Handlers translate requests into calls on `services` and map
//! `ServiceError` onto the JSON error envelope.

#![forbid(unsafe_code)]

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
