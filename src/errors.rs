//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`ViewerError`] covers the failure modes of the
//! loading pipeline:
//! - Asset reading (local files, HTTP)
//! - Clip manifest decoding
//! - Asset load-state bookkeeping
//!
//! Transport operations never fail. Out-of-range indices and calls made
//! before any clips are known are silent no-ops, so they have no variant here.
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ViewerError>`. Load failures stop at the viewer:
//! they are recorded as [`LoadState::Error`](crate::assets::LoadState::Error)
//! instead of being returned to the caller.

use thiserror::Error;

use crate::assets::LoadState;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The asset resolved but its contents could not be understood.
    #[error("Invalid asset '{source_uri}': {reason}")]
    InvalidAsset {
        /// URI of the offending asset
        source_uri: String,
        /// What was wrong with it
        reason: String,
    },

    /// An asset load-state transition that the lifecycle does not allow.
    #[error("Invalid load state transition: {from:?} -> {to}")]
    InvalidTransition {
        /// State the asset was in
        from: LoadState,
        /// Name of the state that was requested
        to: &'static str,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // HTTP & Network Errors
    // ========================================================================
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// URL parsing error.
    #[cfg(feature = "http")]
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// HTTP response error with status code.
    #[error("HTTP response error: status {status}")]
    HttpResponseError {
        /// HTTP status code
        status: u16,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// Feature not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),

    /// The async runtime backing asset loads could not be started.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Alias for `Result<T, ViewerError>`.
pub type Result<T> = std::result::Result<T, ViewerError>;
