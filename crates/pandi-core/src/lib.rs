// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pandi — Core types, error definitions, and the role-scoped offer rules
// shared across all crates.

pub mod access;
pub mod assets;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod listing;
pub mod offer;
pub mod role;
pub mod types;

pub use access::{OfferPanel, RouteAccess, Viewer};
pub use config::AppConfig;
pub use error::PandiError;
pub use role::ServiceRole;
pub use types::*;
