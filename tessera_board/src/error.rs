// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by import, export, persistence, and configuration.

use thiserror::Error;

/// Errors raised by board operations that can fail.
///
/// Every failing operation leaves the board exactly as it was before the call.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Input was not valid JSON or did not match the snapshot layout.
    #[error("malformed board data: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration file could not be parsed.
    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// One element in an imported snapshot failed validation.
    #[error("invalid element at index {index}: {reason}")]
    InvalidElement {
        /// Position of the element in the snapshot's `elements` array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Imported pan or scale is unusable.
    #[error("invalid viewport: {reason}")]
    InvalidViewport {
        /// What was wrong with it.
        reason: String,
    },

    /// Snapshot was written by a newer schema than this build understands.
    #[error("unsupported snapshot version {found} (newest known is {supported})")]
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Newest version this build reads.
        supported: u32,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with it.
        reason: String,
    },

    /// A color string was not `#rgb` or `#rrggbb`.
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// A style snapshot is out of range.
    #[error("invalid style: {reason}")]
    InvalidStyle {
        /// What was wrong with it.
        reason: String,
    },
}

/// Result alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
