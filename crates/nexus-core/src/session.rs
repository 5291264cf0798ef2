//! Process-wide authentication state.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::error::StorageError;
use crate::tokens::{AccessToken, RefreshToken};
use crate::traits::{AuthState, CredentialStore};

/// Storage keys for one application's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub refresh_token: String,
    pub user_info: String,
}

impl StorageKeys {
    /// Keys `<prefix>-token`, `<prefix>-refresh-token` and `<prefix>-info`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            token: format!("{}-token", prefix),
            refresh_token: format!("{}-refresh-token", prefix),
            user_info: format!("{}-info", prefix),
        }
    }
}

/// Token payload returned by login, register and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: AccessToken,
    #[serde(default)]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub user_info: Option<Value>,
}

#[derive(Debug, Default)]
struct SessionData {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
    user_info: Option<Value>,
}

/// The single session object shared by the HTTP client, the session store
/// and the navigation guard.
///
/// Every mutation is mirrored synchronously into the [`CredentialStore`];
/// [`SessionState::restore`] reads it back at start-up.
pub struct SessionState {
    data: RwLock<SessionData>,
    store: Arc<dyn CredentialStore>,
    keys: StorageKeys,
}

impl SessionState {
    /// Restore the session persisted under `keys`.
    ///
    /// An unreadable user-info blob is dropped with a warning; the token
    /// alone still counts as a session.
    #[instrument(skip(store), fields(key = %keys.token))]
    pub fn restore(store: Arc<dyn CredentialStore>, keys: StorageKeys) -> Result<Self> {
        let access_token = store
            .get(&keys.token)?
            .filter(|t| !t.is_empty())
            .map(AccessToken::new);
        let refresh_token = store
            .get(&keys.refresh_token)?
            .filter(|t| !t.is_empty())
            .map(RefreshToken::new);
        let user_info = match store.get(&keys.user_info)? {
            Some(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Null) => None,
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable stored user info");
                    None
                }
            },
            None => None,
        };

        debug!(logged_in = access_token.is_some(), "Session restored");

        Ok(Self {
            data: RwLock::new(SessionData {
                access_token,
                refresh_token,
                user_info,
            }),
            store,
            keys,
        })
    }

    /// Returns the storage keys this session persists under.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Returns the current access token.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.read().access_token.clone()
    }

    /// Returns the current refresh token.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.read().refresh_token.clone()
    }

    /// Returns the stored user info record.
    pub fn user_info(&self) -> Option<Value> {
        self.read().user_info.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().access_token.is_some()
    }

    /// Replace the session with freshly issued tokens.
    ///
    /// The store is written first; memory only changes once every key is
    /// persisted. If any write fails, keys already written are put back to
    /// their previous values before the error is returned.
    #[instrument(skip_all)]
    pub fn set_auth_data(&self, auth: &AuthData) -> Result<()> {
        let user_info = auth
            .user_info
            .as_ref()
            .map(|info| {
                serde_json::to_string(info).map_err(|e| StorageError::Serialize {
                    key: self.keys.user_info.clone(),
                    message: e.to_string(),
                })
            })
            .transpose()?;

        let mut data = self.write();

        let writes = [
            (self.keys.token.as_str(), Some(auth.access_token.as_str())),
            (
                self.keys.refresh_token.as_str(),
                auth.refresh_token.as_ref().map(RefreshToken::as_str),
            ),
            (self.keys.user_info.as_str(), user_info.as_deref()),
        ];
        let mut previous: Vec<(&str, Option<String>)> = Vec::with_capacity(writes.len());
        for (key, value) in writes {
            let written = self.store.get(key).and_then(|old| {
                previous.push((key, old));
                self.put(key, value)
            });
            if let Err(e) = written {
                self.roll_back(&previous);
                return Err(e);
            }
        }

        data.access_token = Some(auth.access_token.clone());
        data.refresh_token = auth.refresh_token.clone();
        data.user_info = auth.user_info.clone();

        debug!("Session tokens stored");
        Ok(())
    }

    /// Drop the session from memory and from the store.
    ///
    /// Returns true if a token was held. Concurrent callers are serialized,
    /// so exactly one of them sees `true` for a given session. Store failures
    /// are logged; memory is cleared regardless.
    #[instrument(skip_all)]
    pub fn clear(&self) -> bool {
        let mut data = self.write();
        let had_token = data.access_token.is_some();
        *data = SessionData::default();

        for key in [&self.keys.token, &self.keys.refresh_token, &self.keys.user_info] {
            if let Err(e) = self.store.remove(key) {
                warn!(key = %key, error = %e, "Failed to remove stored credential");
            }
        }

        debug!(had_token, "Session cleared");
        had_token
    }

    fn put(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        }
    }

    fn roll_back(&self, previous: &[(&str, Option<String>)]) {
        for (key, old) in previous.iter().rev() {
            if let Err(e) = self.put(key, old.as_deref()) {
                warn!(key = %key, error = %e, "Failed to restore stored credential");
            }
        }
        debug!(keys = previous.len(), "Rolled back partial session write");
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl AuthState for SessionState {
    fn is_logged_in(&self) -> bool {
        SessionState::is_logged_in(self)
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("keys", &self.keys)
            .field("logged_in", &self.is_logged_in())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryStore;

    fn auth(token: &str) -> AuthData {
        AuthData {
            access_token: AccessToken::new(token),
            refresh_token: Some(RefreshToken::new("refresh-1")),
            token_type: Some("Bearer".into()),
            expires_at: None,
            user_info: Some(json!({"id": 7, "email": "alice@example.com"})),
        }
    }

    #[test]
    fn storage_keys_follow_prefix() {
        let keys = StorageKeys::with_prefix("admin");
        assert_eq!(keys.token, "admin-token");
        assert_eq!(keys.refresh_token, "admin-refresh-token");
        assert_eq!(keys.user_info, "admin-info");
    }

    #[test]
    fn set_auth_data_persists_every_key() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionState::restore(store.clone(), StorageKeys::with_prefix("user")).unwrap();
        assert!(!session.is_logged_in());

        session.set_auth_data(&auth("tok-1")).unwrap();

        assert!(session.is_logged_in());
        assert_eq!(store.get("user-token").unwrap().as_deref(), Some("tok-1"));
        assert_eq!(
            store.get("user-refresh-token").unwrap().as_deref(),
            Some("refresh-1")
        );
        let info: Value = serde_json::from_str(&store.get("user-info").unwrap().unwrap()).unwrap();
        assert_eq!(info["email"], "alice@example.com");
    }

    /// Fails every write to one key.
    struct FailingKey {
        inner: MemoryStore,
        key: &'static str,
    }

    impl CredentialStore for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if key == self.key {
                return Err(StorageError::Other {
                    message: "disk full".into(),
                }
                .into());
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let store = Arc::new(FailingKey {
            inner: MemoryStore::new(),
            key: "user-refresh-token",
        });
        let keys = StorageKeys::with_prefix("user");
        let session = SessionState::restore(store.clone(), keys.clone()).unwrap();

        assert!(session.set_auth_data(&auth("tok-new")).is_err());
        assert!(!session.is_logged_in());
        assert!(store.inner.is_empty());

        let restarted = SessionState::restore(store, keys).unwrap();
        assert!(!restarted.is_logged_in());
    }

    #[test]
    fn failed_write_restores_previous_session() {
        let store = Arc::new(FailingKey {
            inner: MemoryStore::new(),
            key: "user-info",
        });
        store.inner.set("user-token", "tok-old").unwrap();
        store.inner.set("user-refresh-token", "refresh-old").unwrap();
        let keys = StorageKeys::with_prefix("user");
        let session = SessionState::restore(store.clone(), keys.clone()).unwrap();

        assert!(session.set_auth_data(&auth("tok-new")).is_err());
        assert_eq!(session.access_token().unwrap().as_str(), "tok-old");

        let restarted = SessionState::restore(store, keys).unwrap();
        assert_eq!(restarted.access_token().unwrap().as_str(), "tok-old");
        assert_eq!(restarted.refresh_token().unwrap().as_str(), "refresh-old");
        assert!(restarted.user_info().is_none());
    }

    #[test]
    fn restore_reads_previous_session() {
        let store = Arc::new(MemoryStore::new());
        let keys = StorageKeys::with_prefix("user");
        SessionState::restore(store.clone(), keys.clone())
            .unwrap()
            .set_auth_data(&auth("tok-2"))
            .unwrap();

        let restored = SessionState::restore(store, keys).unwrap();
        assert_eq!(restored.access_token().unwrap().as_str(), "tok-2");
        assert_eq!(restored.user_info().unwrap()["id"], 7);
    }

    #[test]
    fn restore_tolerates_corrupt_user_info() {
        let store = Arc::new(MemoryStore::new());
        store.set("user-token", "tok").unwrap();
        store.set("user-info", "{not json").unwrap();

        let session = SessionState::restore(store, StorageKeys::with_prefix("user")).unwrap();
        assert!(session.is_logged_in());
        assert!(session.user_info().is_none());
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let store = Arc::new(MemoryStore::new());
        store.set("user-token", "").unwrap();
        let session = SessionState::restore(store, StorageKeys::with_prefix("user")).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let session = SessionState::restore(store.clone(), StorageKeys::with_prefix("user")).unwrap();
        session.set_auth_data(&auth("tok-3")).unwrap();

        assert!(session.clear());
        assert!(!session.clear());
        assert!(!session.is_logged_in());
        assert!(store.is_empty());
    }

    #[test]
    fn namespaces_do_not_collide() {
        let store = Arc::new(MemoryStore::new());
        let user = SessionState::restore(store.clone(), StorageKeys::with_prefix("user")).unwrap();
        let admin = SessionState::restore(store.clone(), StorageKeys::with_prefix("admin")).unwrap();

        user.set_auth_data(&auth("user-tok")).unwrap();
        assert!(!admin.is_logged_in());

        admin.set_auth_data(&auth("admin-tok")).unwrap();
        user.clear();
        assert_eq!(store.get("admin-token").unwrap().as_deref(), Some("admin-tok"));
    }

    #[test]
    fn auth_data_parses_backend_payload() {
        let data: AuthData = serde_json::from_value(json!({
            "accessToken": "a",
            "refreshToken": "r",
            "tokenType": "Bearer",
            "expiresAt": "2025-09-22T15:30:00",
            "userInfo": {"id": 1, "nickname": "alice"}
        }))
        .unwrap();
        assert_eq!(data.access_token.as_str(), "a");
        assert!(data.expires_at.is_some());
        assert!(!format!("{:?}", data).contains("\"a\""));
    }
}
