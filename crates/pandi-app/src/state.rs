// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use pandi_core::access::Viewer;
use pandi_core::human_errors::{HumanError, Severity};
use pandi_core::role::ServiceRole;
use pandi_core::types::User;

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The signed-in user, mirrored from the session.
    pub user: Option<User>,
    /// Seeker or provider view.
    pub role: ServiceRole,
    /// Banner shown above the page until dismissed.
    pub notice: Option<Notice>,
}

/// A one-line banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    /// `None` for confirmations; errors keep their severity for styling.
    pub severity: Option<Severity>,
    /// Pressing the same button again may work.
    pub retriable: bool,
}

impl Notice {
    pub fn info(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: None,
            retriable: false,
        }
    }

    pub fn error(human: HumanError) -> Self {
        Self {
            title: human.title,
            body: human.description,
            severity: Some(human.severity),
            retriable: human.retriable,
        }
    }
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            user: svc.session().user(),
            role: svc.role(),
            notice: None,
        }
    }

    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.user.clone(), self.role)
    }
}
