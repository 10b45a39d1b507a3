//! Tubely API Library
//!
//! This crate provides the HTTP handlers, the upload pipeline, authentication
//! middleware, and application setup.

// Module declarations
pub mod constants;
mod handlers;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod services;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{AssetClass, UploadPipeline};
pub use state::AppState;
