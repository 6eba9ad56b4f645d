// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pandi Client — async REST client for the marketplace backend.  One
// transport (`ApiClient`) with bearer auth and single-shot token refresh,
// plus one module of typed endpoints per resource.

pub mod api_client;
mod auth;
mod businesses;
mod contact;
mod offers;
mod provider_offerings;
mod reviews;
mod service_requests;

pub use api_client::ApiClient;
