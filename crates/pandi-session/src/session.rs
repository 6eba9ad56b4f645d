// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Auth session — the signed-in user and their bearer token.
//
// The session is restored once at startup and then changes only through
// login, logout, profile updates and token refresh.  There is no periodic
// re-validation.  Logout (explicit, or forced by a failed refresh) is
// broadcast so every open page can react.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use pandi_core::error::Result;
use pandi_core::types::User;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::storage::EncryptedStorage;
use crate::store::SharedStore;
use crate::token::{TokenClaims, fingerprint};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the signed-in user's JSON.
pub const USER_KEY: &str = "user";

/// Why the session changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(User),
    UserUpdated(User),
    TokenRefreshed,
    /// Explicit logout, or a refresh that failed.
    LoggedOut,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Cheaply cloneable handle to the current session.
#[derive(Clone)]
pub struct AuthSession {
    state: Arc<Mutex<SessionState>>,
    store: SharedStore,
    sealer: Option<Arc<EncryptedStorage>>,
    events: broadcast::Sender<SessionEvent>,
}

impl AuthSession {
    /// Create an empty session over `store`. When `sealer` is given the token
    /// is encrypted before it is written.
    pub fn new(store: SharedStore, sealer: Option<EncryptedStorage>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            store,
            sealer: sealer.map(Arc::new),
            events,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Listen for session changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine: nothing is listening yet.
        let _ = self.events.send(event);
    }

    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.state();
        state.token.is_some() && state.user.is_some()
    }

    /// Load a previously stored session.
    pub fn restore(&self) -> Result<Option<User>> {
        self.restore_at(Utc::now())
    }

    /// Load a previously stored session as of `now`.
    ///
    /// Both the token and the user must be present, the user JSON must parse,
    /// and the token must not be expired; otherwise both keys are cleared and
    /// the session stays signed out.
    #[instrument(skip_all)]
    pub fn restore_at(&self, now: DateTime<Utc>) -> Result<Option<User>> {
        let (stored_token, stored_user) = {
            let store = self.store.lock();
            (store.get(TOKEN_KEY)?, store.get(USER_KEY)?)
        };

        let (Some(stored_token), Some(stored_user)) = (stored_token, stored_user) else {
            debug!("no stored session");
            return Ok(None);
        };

        let restored = self.open_token(&stored_token).and_then(|token| {
            let claims = TokenClaims::decode(&token)?;
            let user: User = serde_json::from_str(&stored_user)?;
            Ok((token, claims, user))
        });

        match restored {
            Ok((token, claims, user)) if claims.is_valid_at(now) => {
                info!(user_id = %user.id, token = %fingerprint(&token), "session restored");
                let mut state = self.state();
                state.token = Some(token);
                state.user = Some(user.clone());
                Ok(Some(user))
            }
            Ok(_) => {
                info!("stored token expired, clearing session");
                self.clear_stored()?;
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "stored session unreadable, clearing");
                self.clear_stored()?;
                Ok(None)
            }
        }
    }

    /// Store `token` and `user` and mark the session signed in.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub fn login(&self, token: String, user: User) -> Result<()> {
        self.persist(&token, &user)?;
        {
            let mut state = self.state();
            state.token = Some(token);
            state.user = Some(user.clone());
        }
        info!("signed in");
        self.emit(SessionEvent::LoggedIn(user));
        Ok(())
    }

    /// Swap in a refreshed token (and the user the server returned with it).
    #[instrument(skip_all)]
    pub fn replace_token(&self, token: String, user: User) -> Result<()> {
        self.persist(&token, &user)?;
        {
            let mut state = self.state();
            state.token = Some(token.clone());
            state.user = Some(user);
        }
        debug!(token = %fingerprint(&token), "token refreshed");
        self.emit(SessionEvent::TokenRefreshed);
        Ok(())
    }

    /// Replace the stored profile after an edit.
    pub fn update_user(&self, user: User) -> Result<()> {
        self.store
            .lock()
            .set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.state().user = Some(user.clone());
        self.emit(SessionEvent::UserUpdated(user));
        Ok(())
    }

    /// Forget the session and tell every listener.
    ///
    /// In-memory state is always cleared; a storage failure is logged, since
    /// the user must end up signed out either way.
    pub fn logout(&self) {
        {
            let mut state = self.state();
            state.token = None;
            state.user = None;
        }
        if let Err(e) = self.clear_stored() {
            warn!(error = %e, "failed to clear stored session");
        }
        info!("signed out");
        self.emit(SessionEvent::LoggedOut);
    }

    fn persist(&self, token: &str, user: &User) -> Result<()> {
        let stored_token = match &self.sealer {
            Some(sealer) => sealer.seal(token)?,
            None => token.to_owned(),
        };
        let user_json = serde_json::to_string(user)?;

        let store = self.store.lock();
        store.set(TOKEN_KEY, &stored_token)?;
        store.set(USER_KEY, &user_json)?;
        Ok(())
    }

    fn open_token(&self, stored: &str) -> Result<String> {
        match &self.sealer {
            Some(sealer) => sealer.unseal(stored),
            None => Ok(stored.to_owned()),
        }
    }

    fn clear_stored(&self) -> Result<()> {
        let store = self.store.lock();
        store.remove(TOKEN_KEY)?;
        store.remove(USER_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use crate::token::tests::jwt;
    use chrono::TimeZone;
    use pandi_core::types::UserType;

    fn user() -> User {
        User {
            id: "u1".into(),
            first_name: "Meena".into(),
            last_name: "S".into(),
            email: "meena@example.com".into(),
            user_type: UserType::Customer,
        }
    }

    fn store() -> SharedStore {
        SharedStore::new(LocalStore::open_in_memory().expect("store"))
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("timestamp")
    }

    #[test]
    fn login_then_restore_in_a_new_session() {
        let store = store();
        let token = jwt(serde_json::json!({ "id": "u1", "exp": 5_000 }));

        AuthSession::new(store.clone(), None)
            .login(token.clone(), user())
            .expect("login");

        let fresh = AuthSession::new(store, None);
        assert_eq!(fresh.restore_at(at(1_000)).expect("restore"), Some(user()));
        assert!(fresh.is_authenticated());
        assert_eq!(fresh.token(), Some(token));
    }

    #[test]
    fn expired_token_is_cleared_on_restore() {
        let store = store();
        AuthSession::new(store.clone(), None)
            .login(jwt(serde_json::json!({ "exp": 5_000 })), user())
            .expect("login");

        let fresh = AuthSession::new(store.clone(), None);
        assert_eq!(fresh.restore_at(at(6_000)).expect("restore"), None);
        assert!(!fresh.is_authenticated());
        assert!(store.lock().get(TOKEN_KEY).expect("get").is_none());
        assert!(store.lock().get(USER_KEY).expect("get").is_none());
    }

    #[test]
    fn token_without_expiry_restores() {
        let store = store();
        AuthSession::new(store.clone(), None)
            .login(jwt(serde_json::json!({ "id": "u1" })), user())
            .expect("login");
        assert!(AuthSession::new(store, None)
            .restore_at(at(i64::from(i32::MAX)))
            .expect("restore")
            .is_some());
    }

    #[test]
    fn corrupt_user_json_is_cleared() {
        let store = store();
        store
            .lock()
            .set(TOKEN_KEY, &jwt(serde_json::json!({})))
            .expect("seed token");
        store.lock().set(USER_KEY, "{not json").expect("seed user");

        let session = AuthSession::new(store.clone(), None);
        assert_eq!(session.restore_at(at(0)).expect("restore"), None);
        assert!(store.lock().is_empty().expect("is_empty"));
    }

    #[test]
    fn sealed_token_is_not_stored_in_clear() {
        let store = store();
        let token = jwt(serde_json::json!({ "exp": 5_000 }));
        let dir = tempfile::tempdir().expect("tempdir");
        let key_path = dir.path().join("session.key");

        AuthSession::new(
            store.clone(),
            Some(EncryptedStorage::load_or_create(&key_path).expect("key")),
        )
        .login(token.clone(), user())
        .expect("login");
        let stored = store.lock().get(TOKEN_KEY).expect("get").expect("present");
        assert_ne!(stored, token);

        let reopened = AuthSession::new(
            store,
            Some(EncryptedStorage::load_or_create(&key_path).expect("reload key")),
        );
        reopened.restore_at(at(1_000)).expect("restore");
        assert_eq!(reopened.token(), Some(token));
    }

    #[tokio::test]
    async fn logout_clears_and_broadcasts() {
        let store = store();
        let session = AuthSession::new(store.clone(), None);
        let mut events = session.subscribe();

        session
            .login(jwt(serde_json::json!({})), user())
            .expect("login");
        session.logout();

        assert_eq!(events.recv().await.expect("event"), SessionEvent::LoggedIn(user()));
        assert_eq!(events.recv().await.expect("event"), SessionEvent::LoggedOut);
        assert!(!session.is_authenticated());
        assert!(store.lock().is_empty().expect("is_empty"));
    }

    #[test]
    fn update_user_persists_profile() {
        let store = store();
        let session = AuthSession::new(store.clone(), None);
        session
            .login(jwt(serde_json::json!({})), user())
            .expect("login");

        let renamed = User {
            first_name: "Meenakshi".into(),
            ..user()
        };
        session.update_user(renamed.clone()).expect("update");

        let fresh = AuthSession::new(store, None);
        assert_eq!(fresh.restore_at(at(0)).expect("restore"), Some(renamed));
    }
}
