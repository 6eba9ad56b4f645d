// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persisted seeker/provider toggle.

use pandi_core::error::Result;
use pandi_core::role::{ROLE_KEY, ServiceRole};
use tracing::{info, warn};

use crate::store::SharedStore;

/// Reads and writes the service role under its storage key.
#[derive(Clone)]
pub struct RoleStore {
    store: SharedStore,
}

impl RoleStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// The stored role. Missing, unrecognised or unreadable values all mean
    /// seeker.
    pub fn load(&self) -> ServiceRole {
        match self.store.lock().get(ROLE_KEY) {
            Ok(stored) => ServiceRole::parse_stored(stored.as_deref()),
            Err(e) => {
                warn!(error = %e, "could not read service role, using seeker");
                ServiceRole::Seeker
            }
        }
    }

    pub fn set(&self, role: ServiceRole) -> Result<()> {
        self.store.lock().set(ROLE_KEY, role.as_str())?;
        info!(role = %role, "service role changed");
        Ok(())
    }

    /// Flip the stored role and return the new one.
    pub fn toggle(&self) -> Result<ServiceRole> {
        let next = self.load().toggle();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    #[test]
    fn defaults_to_seeker() {
        let roles = RoleStore::new(SharedStore::new(LocalStore::open_in_memory().expect("store")));
        assert_eq!(roles.load(), ServiceRole::Seeker);
    }

    #[test]
    fn unknown_value_reads_as_seeker() {
        let store = SharedStore::new(LocalStore::open_in_memory().expect("store"));
        store.lock().set(ROLE_KEY, "admin").expect("seed");
        assert_eq!(RoleStore::new(store).load(), ServiceRole::Seeker);
    }

    #[test]
    fn set_overwrites_the_stored_role() {
        let roles = RoleStore::new(SharedStore::new(LocalStore::open_in_memory().expect("store")));
        roles.set(ServiceRole::Provider).expect("set");
        assert_eq!(roles.load(), ServiceRole::Provider);
    }

    #[test]
    fn toggle_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("local.db");

        {
            let roles = RoleStore::new(SharedStore::new(LocalStore::open(&path).expect("open")));
            assert_eq!(roles.toggle().expect("toggle"), ServiceRole::Provider);
        }

        let roles = RoleStore::new(SharedStore::new(LocalStore::open(&path).expect("reopen")));
        assert_eq!(roles.load(), ServiceRole::Provider);
        assert_eq!(roles.toggle().expect("toggle back"), ServiceRole::Seeker);
        assert_eq!(roles.load(), ServiceRole::Seeker);
    }
}
