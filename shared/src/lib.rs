//! Shared types for ABSENTA
//!
//! Common types used across the client and the mock backend: domain
//! models, the unified error system, API envelopes, and utility types.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::{ApiResponse, PaginatedResponse, Pagination};
