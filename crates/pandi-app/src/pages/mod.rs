// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod auth;
pub mod businesses;
pub mod common;
pub mod contact;
pub mod home;
pub mod notifications;
pub mod offerings;
pub mod request_details;
pub mod requests;
pub mod settings;
