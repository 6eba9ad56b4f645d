// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pandi-session — everything the app keeps on the device between launches.
//
// The signed-in user and bearer token, the seeker/provider toggle, and the
// SQLite key/value store they live in.  The token can be sealed with a
// device-local age key before it is written.

pub mod role_store;
pub mod session;
pub mod storage;
pub mod store;
pub mod token;

pub use role_store::RoleStore;
pub use session::{AuthSession, SessionEvent};
pub use storage::EncryptedStorage;
pub use store::{LocalStore, SharedStore};
pub use token::{TokenClaims, fingerprint};
