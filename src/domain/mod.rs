//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    ApiResponse, BotCredentials, DocumentUpload, RelayOutcome, RelayReport, UploadPayload,
    mask_secret,
};
pub use errors::DomainError;
