// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seeker/provider view mode.
//
// The role only selects which action buttons and contact fields are rendered.
// It is not an access-control boundary: every field it hides is still present
// in the API responses.

use serde::{Deserialize, Serialize};

/// Storage key the role is persisted under.
pub const ROLE_KEY: &str = "serviceRole";

/// Which side of the marketplace the user is currently acting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    /// Looking for a service.
    #[default]
    Seeker,
    /// Offering a service.
    Provider,
}

impl ServiceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeker => "seeker",
            Self::Provider => "provider",
        }
    }

    /// The other role.
    pub fn toggle(self) -> Self {
        match self {
            Self::Seeker => Self::Provider,
            Self::Provider => Self::Seeker,
        }
    }

    /// Read a persisted value. Anything other than the two known values,
    /// including nothing at all, yields the default `Seeker`.
    pub fn parse_stored(value: Option<&str>) -> Self {
        match value {
            Some("provider") => Self::Provider,
            _ => Self::Seeker,
        }
    }

    /// Toggle button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Seeker => "Need help",
            Self::Provider => "Offer services",
        }
    }
}

impl std::fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
