//! ABSENTA Client - HTTP client and dashboard state core
//!
//! Provides the typed HTTP client for the ABSENTA backend API plus the
//! client-side state machines the dashboards are built on: the optimistic
//! attendance update coordinator, the edit-window policy, and the appeal
//! review workflow.

pub mod api;
pub mod appeal;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod http;
pub mod policy;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

pub use api::{AppealApi, AttendanceApi};
pub use appeal::AppealReviewer;
pub use coordinator::{AttendanceCoordinator, Notice, NoticeKind, UpdateOutcome};
pub use policy::{EditWindow, ViewEvent, ViewWindow};
pub use session::{Credential, CredentialStorage};

// Re-export shared types for convenience
pub use shared::models::{CurrentUserResponse, LoginResponse, UserInfo};
pub use shared::response::ApiResponse;
