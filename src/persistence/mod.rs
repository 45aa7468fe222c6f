//! Persistence — where design projects and the product catalog live.
//!
//! DESIGN
//! ======
//! The designer talks to storage only through [`ProjectRepository`], an async
//! trait so the document-store client can be swapped for the in-memory
//! backend in tests. Repositories move flat [`ProjectRecord`]s; turning them
//! into scenes is the caller's job (see [`crate::project`]).
//!
//! Failures are plain [`PersistenceError`] values. There is no retry policy:
//! a failed call is final for that call.

pub mod config;
pub mod http;
pub mod memory;

use crate::catalog::Product;
use crate::project::{ProjectRecord, SnapshotError};

pub use config::BackendConfig;
pub use http::HttpRepository;
pub use memory::MemoryRepository;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// A configuration value is missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// The variable expected to hold the API key is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status.
    #[error("store responded with status {status}")]
    Response { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// No document with this id.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The backend refused to serve the call.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Grepable error codes for logs and host-facing messages.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

impl ErrorCode for PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_CONFIG",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_REQUEST",
            Self::Response { .. } => "E_RESPONSE",
            Self::Parse(_) => "E_PARSE",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::Unavailable(_) => "E_UNAVAILABLE",
        }
    }
}

impl ErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "E_SNAPSHOT_DECODE",
            Self::Encode { .. } | Self::NonFinite { .. } => "E_SNAPSHOT_ENCODE",
        }
    }
}

// =============================================================================
// REPOSITORY TRAIT
// =============================================================================

/// Storage for projects and catalog products.
#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the catalog cannot be read.
    async fn get_all_products(&self) -> Result<Vec<Product>, PersistenceError>;

    /// Fetch one project record.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] for an unknown id, or another
    /// variant if the store cannot be reached.
    async fn get_project(&self, id: &str) -> Result<ProjectRecord, PersistenceError>;

    /// Create a project and return the stored record, identity included.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the store rejects the write.
    async fn create_project(&self, fields: ProjectRecord) -> Result<ProjectRecord, PersistenceError>;

    /// Overwrite the fields of an existing project. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] for an unknown id, or another
    /// variant if the store rejects the write.
    async fn update_project(&self, id: &str, fields: ProjectRecord) -> Result<ProjectRecord, PersistenceError>;

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] for an unknown id, or another
    /// variant if the store rejects the delete.
    async fn delete_project(&self, id: &str) -> Result<(), PersistenceError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
