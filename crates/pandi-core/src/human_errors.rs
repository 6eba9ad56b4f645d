// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error notices — the text shown in toast notifications.
//
// Server-supplied messages win: when the backend explains a failure ("You have
// already made an offer on this request") that explanation is shown verbatim.

use crate::error::PandiError;

/// Shown when the session could not be refreshed.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip, server hiccup — trying again may work.
    Transient,
    /// The user must fix their input or sign in.
    ActionRequired,
    /// Retrying will not help.
    Permanent,
}

/// A toast-ready error with title, body and severity.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanError {
    /// Toast heading.
    pub title: String,
    /// Toast body.
    pub description: String,
    /// Whether pressing the same button again may succeed.
    pub retriable: bool,
    /// Drives the toast variant.
    pub severity: Severity,
    /// The user should be sent to the login page.
    pub sign_in: bool,
}

impl HumanError {
    fn new(title: &str, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            retriable: severity == Severity::Transient,
            severity,
            sign_in: false,
        }
    }

    /// Replace the heading with the name of the operation that failed
    /// (e.g. "Offer Failed"), keeping the explanation.
    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }
}

/// Convert a `PandiError` into a notice a non-technical user can act on.
pub fn humanize_error(err: &PandiError) -> HumanError {
    match err {
        // -- Backend --
        PandiError::Network(_) => HumanError::new(
            "Connection problem",
            "We couldn't reach the server. Check your internet connection and try again.",
            Severity::Transient,
        ),

        PandiError::Api { status, message } => humanize_api_error(*status, message),

        PandiError::Unauthorized => HumanError {
            sign_in: true,
            ..HumanError::new(
                "Please sign in",
                "You need to be signed in to do that.",
                Severity::ActionRequired,
            )
        },

        PandiError::SessionExpired => HumanError {
            sign_in: true,
            ..HumanError::new("Session expired", SESSION_EXPIRED_MESSAGE, Severity::ActionRequired)
        },

        PandiError::NotFound(what) => HumanError::new(
            "Not found",
            format!("That {what} no longer exists. It may have been deleted."),
            Severity::Permanent,
        ),

        // -- Session --
        PandiError::InvalidToken(_) => HumanError {
            sign_in: true,
            ..HumanError::new(
                "Please sign in again",
                "Your saved sign-in could not be read.",
                Severity::ActionRequired,
            )
        },

        PandiError::Encryption(_) | PandiError::Decryption(_) => HumanError {
            sign_in: true,
            ..HumanError::new(
                "Secure storage problem",
                "Your saved sign-in could not be unlocked. Please sign in again.",
                Severity::ActionRequired,
            )
        },

        // -- Offers --
        PandiError::InvalidTransition { from, .. } => HumanError::new(
            "Offer already decided",
            format!("This offer is already {from} and can no longer be changed."),
            Severity::Permanent,
        ),

        PandiError::NotPermitted(detail) => {
            HumanError::new("Not allowed", capitalise(detail), Severity::Permanent)
        }

        // -- Input --
        PandiError::Validation(detail) => {
            HumanError::new("Check your input", capitalise(detail), Severity::ActionRequired)
        }

        // -- Local storage --
        PandiError::Storage(_) | PandiError::Io(_) => HumanError::new(
            "Storage problem",
            "The app couldn't save its local data. Try again; if this keeps happening, restart the app.",
            Severity::Transient,
        ),

        PandiError::Serialization(_) => HumanError::new(
            "Unexpected response",
            "The server sent something we didn't understand. Please try again later.",
            Severity::Transient,
        ),
    }
}

fn humanize_api_error(status: u16, message: &str) -> HumanError {
    let severity = match status {
        500.. => Severity::Transient,
        400..=499 => Severity::ActionRequired,
        _ => Severity::Permanent,
    };

    if !message.trim().is_empty() {
        return HumanError::new("Request failed", message.trim(), severity);
    }

    match status {
        403 => HumanError::new(
            "Not allowed",
            "You don't have permission to do that.",
            Severity::Permanent,
        ),
        404 => HumanError::new("Not found", "That item no longer exists.", Severity::Permanent),
        409 => HumanError::new(
            "Already exists",
            "This has already been submitted.",
            Severity::Permanent,
        ),
        500.. => HumanError::new(
            "Server problem",
            "The server had a problem. Please try again in a moment.",
            Severity::Transient,
        ),
        _ => HumanError::new(
            "Request failed",
            "Something went wrong. Please check your input and try again.",
            severity,
        ),
    }
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
