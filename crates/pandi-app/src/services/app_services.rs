// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — opens local storage, restores the session, and
// hands the UI one cloneable bundle of the REST client, the session and the
// role toggle.
//
// There is no shared cache: each page asks the client for what it shows.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use pandi_client::ApiClient;
use pandi_core::AppConfig;
use pandi_core::assets::asset_url;
use pandi_core::error::Result;
use pandi_core::role::ServiceRole;
use pandi_session::{AuthSession, EncryptedStorage, LocalStore, RoleStore, SharedStore};
use tracing::{info, warn};

use super::data_dir;

/// Shared application services, provided to every component as context.
///
/// All fields are cheaply cloneable so the struct can move into closures and
/// async blocks.
#[derive(Clone)]
pub struct AppServices {
    client: ApiClient,
    roles: RoleStore,
    data_dir: Option<PathBuf>,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise against the on-disk data directory. Call once at startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir()?;
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default().with_env_overrides();
        let store = SharedStore::new(LocalStore::open(data_dir::store_path(&dir))?);
        let sealer = if config.encrypt_session {
            Some(EncryptedStorage::load_or_create(data_dir::key_path(&dir))?)
        } else {
            None
        };

        Self::assemble(config, store, sealer, Some(dir))
    }

    /// In-memory services for when the data directory is unusable. Nothing
    /// survives a restart.
    pub fn fallback() -> Result<Self> {
        let config = AppConfig::default().with_env_overrides();
        let store = SharedStore::new(LocalStore::open_in_memory()?);
        Self::assemble(config, store, None, None)
    }

    fn assemble(
        config: AppConfig,
        store: SharedStore,
        sealer: Option<EncryptedStorage>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let session = AuthSession::new(store.clone(), sealer);
        match session.restore()? {
            Some(user) => info!(user_id = %user.id, "signed in from previous launch"),
            None => info!("starting signed out"),
        }

        let client = ApiClient::new(config.clone(), session)?;
        Ok(Self {
            client,
            roles: RoleStore::new(store),
            data_dir,
            config: Arc::new(Mutex::new(config)),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &AuthSession {
        self.client.session()
    }

    // -- Role ----------------------------------------------------------------

    pub fn role(&self) -> ServiceRole {
        self.roles.load()
    }

    /// Flip between seeker and provider and persist the choice.
    pub fn toggle_role(&self) -> Result<ServiceRole> {
        self.roles.toggle()
    }

    // -- Config --------------------------------------------------------------

    pub fn config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persist `config`. Endpoint changes apply from the next launch, since
    /// the client was built with the old values.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        match &self.data_dir {
            Some(dir) => persist_config(dir, config),
            None => {
                warn!("no data directory, settings kept for this session only");
                Ok(())
            }
        }
    }

    /// Absolute URL for an image path returned by the API.
    pub fn image_url(&self, image: Option<&str>) -> String {
        asset_url(&self.client.config().asset_base_url, image)
    }
}

fn load_config(dir: &Path) -> Option<AppConfig> {
    let data = std::fs::read_to_string(data_dir::config_path(dir)).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "config.json unreadable, using defaults");
            None
        }
    }
}

fn persist_config(dir: &Path, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(data_dir::config_path(dir), json)?;
    Ok(())
}
