//! The three core operations and their HTTP-facing glue.
//!
//! Every request ends up here, through the [`Dispatch`] impl:
//!   1. `home`  → [`ServerState::get_document`] (no auth)
//!   2. `login` → [`ServerState::login`]
//!   3. `save`  → [`ServerState::save_document`] (token, then body, then disk)
//!
//! # Locking
//!
//! Two `tokio::sync::Mutex`es, one per component. `save_document` holds
//! the session lock across validation *and* the write, so a concurrent
//! login can't re-issue the token between the check and the save. Lock
//! order is always sessions → store.

use guidepost_protocol::{
    Codec, JsonCodec, LoginGrant, NavigationDocument, Reply,
};
use guidepost_session::{CredentialVerifier, SessionAuthority};
use guidepost_store::DocumentStore;
use guidepost_transport::Dispatch;
use tokio::sync::Mutex;

use crate::{GuidepostError, ValidationError};

/// Shared server state handed to every request.
///
/// Wrapped in `Arc` by the server so it can be cheaply cloned into
/// handlers. Interior mutability via `Mutex`.
pub struct ServerState<V> {
    pub(crate) sessions: Mutex<SessionAuthority<V>>,
    pub(crate) store: Mutex<DocumentStore>,
    pub(crate) codec: JsonCodec,
}

impl<V: CredentialVerifier> ServerState<V> {
    /// Assembles state from an authority and an already-opened store.
    pub fn new(sessions: SessionAuthority<V>, store: DocumentStore) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            store: Mutex::new(store),
            codec: JsonCodec,
        }
    }

    /// Returns a copy of the current document. Always succeeds.
    pub async fn get_document(&self) -> NavigationDocument {
        self.store.lock().await.current().clone()
    }

    /// Checks the credential and returns a fresh token, invalidating any
    /// previous one.
    pub async fn login(&self, credential: &str) -> Result<String, GuidepostError> {
        let token = self.sessions.lock().await.authenticate(credential)?;
        Ok(token)
    }

    /// Validates `token`, decodes `body`, persists it, and returns the
    /// now-current document.
    ///
    /// Checks run in that order: a bad token gets `Auth` even if the
    /// body is also garbage. Neither an auth failure nor a malformed
    /// body touches the store.
    pub async fn save_document(
        &self,
        token: &str,
        body: &[u8],
    ) -> Result<NavigationDocument, GuidepostError> {
        let sessions = self.sessions.lock().await;
        sessions.validate(token)?;

        let doc: NavigationDocument = self
            .codec
            .decode(body)
            .map_err(|e| ValidationError::MalformedDocument(e.to_string()))?;

        self.write_locked(doc).await
    }

    /// Like [`save_document`](Self::save_document) for a document that's
    /// already decoded.
    pub async fn replace_document(
        &self,
        token: &str,
        doc: NavigationDocument,
    ) -> Result<NavigationDocument, GuidepostError> {
        let sessions = self.sessions.lock().await;
        sessions.validate(token)?;
        self.write_locked(doc).await
    }

    /// Must be called with the session lock held.
    async fn write_locked(
        &self,
        doc: NavigationDocument,
    ) -> Result<NavigationDocument, GuidepostError> {
        let mut store = self.store.lock().await;
        store.save(doc).await?;
        Ok(store.current().clone())
    }
}

impl<V: CredentialVerifier> Dispatch for ServerState<V> {
    async fn home(&self) -> Reply<NavigationDocument> {
        Reply::ok(self.get_document().await)
    }

    async fn login(&self, credential: &str) -> Reply<LoginGrant> {
        match ServerState::login(self, credential).await {
            Ok(token) => Reply::ok(LoginGrant { token }),
            Err(e) => failure(&e),
        }
    }

    async fn save(&self, token: &str, body: &[u8]) -> Reply<NavigationDocument> {
        match self.save_document(token, body).await {
            Ok(doc) => Reply::ok(doc),
            Err(e) => {
                tracing::warn!(error = %e, "save rejected");
                failure(&e)
            }
        }
    }
}

fn failure<T>(e: &GuidepostError) -> Reply<T> {
    Reply::failure(e.code(), e.client_message())
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Tests for the core operations, without HTTP.
    //!
    //! Each test gets its own temp directory so stores never share a file.

    use std::sync::Arc;

    use guidepost_protocol::{Guide, Tab};
    use guidepost_session::{AuthError, PasswordVerifier, SessionConfig};
    use tempfile::TempDir;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    const SECRET: &str = "123456";

    async fn state(dir: &TempDir) -> ServerState<PasswordVerifier> {
        let store = DocumentStore::open(dir.path().join("data.json")).await;
        ServerState::new(
            SessionAuthority::new(
                PasswordVerifier::new(SECRET),
                SessionConfig::default(),
            ),
            store,
        )
    }

    fn nav() -> NavigationDocument {
        NavigationDocument {
            title: "Nav".into(),
            tabs: vec![Tab {
                title: "Dev".into(),
                guides: vec![Guide {
                    title: "Go".into(),
                    summary: String::new(),
                    color: "#fff".into(),
                    link: "https://go.dev".into(),
                    time: "2024".into(),
                }],
            }],
        }
    }

    fn nav_json() -> Vec<u8> {
        JsonCodec.encode(&nav()).unwrap()
    }

    // =====================================================================
    // get_document()
    // =====================================================================

    #[tokio::test]
    async fn test_get_document_twice_returns_identical_results() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let first = state.get_document().await;
        let second = state.get_document().await;

        assert_eq!(first, second);
    }

    // =====================================================================
    // login()
    // =====================================================================

    #[tokio::test]
    async fn test_login_good_credential_returns_token() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let token = state.login(SECRET).await.expect("should succeed");

        assert_eq!(token.len(), 10);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_login_wrong_credential_returns_401() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let err = state.login("wrong").await.unwrap_err();

        assert!(matches!(err, GuidepostError::Auth(AuthError::BadCredential)));
        assert_eq!(err.code(), 401);
    }

    // =====================================================================
    // save_document()
    // =====================================================================

    #[tokio::test]
    async fn test_save_document_scenario_echoes_and_persists() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;
        let token = state.login(SECRET).await.unwrap();
        assert!(state.login("wrong").await.is_err());

        let echoed = state.save_document(&token, &nav_json()).await.unwrap();

        assert_eq!(echoed, nav());
        assert_eq!(state.get_document().await, nav());
        let on_disk = DocumentStore::open(dir.path().join("data.json")).await;
        assert_eq!(on_disk.current(), &nav());
    }

    #[tokio::test]
    async fn test_save_document_before_login_returns_no_active_session() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let err = state.save_document("anything", &nav_json()).await.unwrap_err();

        assert!(matches!(err, GuidepostError::Auth(AuthError::NoActiveSession)));
        assert!(state.get_document().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_document_bad_token_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;
        let token = state.login(SECRET).await.unwrap();
        state.save_document(&token, &nav_json()).await.unwrap();

        let other = NavigationDocument::titled("Hijacked");
        let err = state
            .save_document("BADTOKEN00", &JsonCodec.encode(&other).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, GuidepostError::Auth(AuthError::TokenMismatch)));
        assert_eq!(state.get_document().await, nav());
    }

    #[tokio::test]
    async fn test_save_document_superseded_token_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;
        let first = state.login(SECRET).await.unwrap();
        let second = state.login(SECRET).await.unwrap();

        let err = state.save_document(&first, &nav_json()).await.unwrap_err();

        assert!(matches!(err, GuidepostError::Auth(AuthError::TokenMismatch)));
        assert!(state.save_document(&second, &nav_json()).await.is_ok());
    }

    #[tokio::test]
    async fn test_save_document_malformed_body_returns_400_and_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;
        let token = state.login(SECRET).await.unwrap();
        state.save_document(&token, &nav_json()).await.unwrap();

        let err = state.save_document(&token, b"{not json}").await.unwrap_err();

        assert!(matches!(err, GuidepostError::Validation(_)));
        assert_eq!(err.code(), 400);
        assert_eq!(state.get_document().await, nav());
    }

    #[tokio::test]
    async fn test_save_document_bad_token_and_bad_body_reports_auth() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;
        state.login(SECRET).await.unwrap();

        let err = state.save_document("nope", b"{not json}").await.unwrap_err();

        assert_eq!(err.code(), 401);
    }

    #[tokio::test]
    async fn test_save_document_write_failure_returns_500_and_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = DocumentStore::open(blocker.join("data.json")).await;
        let state = ServerState::new(
            SessionAuthority::new(
                PasswordVerifier::new(SECRET),
                SessionConfig::default(),
            ),
            store,
        );
        let token = state.login(SECRET).await.unwrap();

        let err = state.save_document(&token, &nav_json()).await.unwrap_err();

        assert!(matches!(err, GuidepostError::Store(_)));
        assert_eq!(err.code(), 500);
        assert!(state.get_document().await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_document_with_live_token_saves() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;
        let token = state.login(SECRET).await.unwrap();

        let saved = state.replace_document(&token, nav()).await.unwrap();

        assert_eq!(saved, nav());
    }

    // =====================================================================
    // Dispatch envelopes
    // =====================================================================

    #[tokio::test]
    async fn test_dispatch_envelopes_carry_codes() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir).await;

        let home = Dispatch::home(&state).await;
        assert_eq!(home.code, 200);

        let denied = Dispatch::login(&state, "wrong").await;
        assert_eq!(denied.code, 401);
        assert!(denied.data.is_none());

        let granted = Dispatch::login(&state, SECRET).await;
        let token = granted.data.expect("token").token;

        let bad = Dispatch::save(&state, &token, b"{not json}").await;
        assert_eq!(bad.code, 400);
        assert_eq!(bad.msg, "invalid request body");

        let ok = Dispatch::save(&state, &token, &nav_json()).await;
        assert_eq!(ok.code, 200);
        assert_eq!(ok.data, Some(nav()));
    }

    // =====================================================================
    // Concurrency
    // =====================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_logins_and_saves_leave_one_valid_token() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(state(&dir).await);

        let mut tasks = Vec::new();
        for i in 0..32 {
            let state = Arc::clone(&state);
            tasks.push(tokio::spawn(async move {
                let token = state.login(SECRET).await.unwrap();
                let doc = NavigationDocument::titled(format!("writer-{i}"));
                // May lose the race to a newer login; either outcome is fine.
                let _ = state.replace_document(&token, doc).await;
                token
            }));
        }
        let mut tokens = Vec::new();
        for task in tasks {
            tokens.push(task.await.unwrap());
        }

        let live: Vec<_> = {
            let sessions = state.sessions.lock().await;
            tokens
                .iter()
                .filter(|t| sessions.validate(t).is_ok())
                .collect()
        };
        assert_eq!(live.len(), 1, "exactly one token may be live");

        let on_disk = state.store.lock().await.load().await;
        assert_eq!(on_disk, state.get_document().await);
    }
}
