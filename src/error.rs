//! Error types for Tracklet
//!
//! Centralized error handling using thiserror.
//!
//! Very little in this crate can fail: the parameter loader converts
//! every collaborator failure into a safe default, so `Result` only
//! appears on the collaborator seams (package-metadata lookup) and on
//! resource-table parsing.

use thiserror::Error;

/// Main error type for Tracklet
#[derive(Error, Debug)]
pub enum TrackletError {
    #[error("package not found: {0}")]
    PackageNotFound(String),

    #[error("resource table parse error: {0}")]
    ResourceTable(#[from] toml::de::Error),
}

/// Result type alias for Tracklet operations
pub type Result<T> = std::result::Result<T, TrackletError>;
