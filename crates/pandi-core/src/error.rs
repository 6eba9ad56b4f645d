// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pandi.

use thiserror::Error;

use crate::types::OfferStatus;

/// Top-level error type for all Pandi operations.
#[derive(Debug, Error)]
pub enum PandiError {
    // -- Backend errors --
    #[error("network request failed: {0}")]
    Network(String),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("not authorised")]
    Unauthorized,

    #[error("session expired")]
    SessionExpired,

    #[error("not found: {0}")]
    NotFound(String),

    // -- Session / token errors --
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    // -- Offer lifecycle --
    #[error("offer cannot move from {from} to {to}")]
    InvalidTransition { from: OfferStatus, to: OfferStatus },

    #[error("not permitted: {0}")]
    NotPermitted(String),

    // -- Input --
    #[error("invalid input: {0}")]
    Validation(String),

    // -- Storage / persistence --
    #[error("storage error: {0}")]
    Storage(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PandiError {
    /// The server-supplied message, if this error carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PandiError>;
