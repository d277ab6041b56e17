//! Session state, decoupled from the router.
//!
//! Owns the two persisted keys: the bearer token and the serialized
//! identity. The router checks access through an injected signal, never by
//! reaching into this module.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::ReservaApi;
use crate::gateway::GatewayError;
use crate::web::KeyValueStore;
use reserva_shared::{LoginForm, SessionUser};


const TOKEN_STORAGE_KEY: &str = "access_token";
const USER_STORAGE_KEY: &str = "user";

/// Bearer credential storage.
///
/// Token presence is the single input the gateway uses to decide whether a
/// request carries `Authorization`.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<String> {
        self.store.get(TOKEN_STORAGE_KEY)
    }

    pub fn set(&self, token: &str) {
        self.store.set(TOKEN_STORAGE_KEY, token);
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_STORAGE_KEY);
    }
}

/// Signed-in user state, shared through Context.
#[derive(Clone)]
pub struct SessionContext {
    user: ReadSignal<Option<SessionUser>>,
    set_user: WriteSignal<Option<SessionUser>>,
    store: Arc<dyn KeyValueStore>,
    tokens: TokenStore,
}

impl SessionContext {
    /// Rehydrates synchronously from storage so the access guard sees the
    /// restored session on the very first render. A corrupt stored identity
    /// reads as anonymous.
    pub fn new(store: Arc<dyn KeyValueStore>, tokens: TokenStore) -> Self {
        let initial = store
            .get(USER_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        let (user, set_user) = signal(initial);

        Self {
            user,
            set_user,
            store,
            tokens,
        }
    }

    /// Snapshot without subscribing.
    pub fn current(&self) -> Option<SessionUser> {
        self.user.get_untracked()
    }

    /// Reactive view, injected into the router for the guards.
    pub fn user_signal(&self) -> Signal<Option<SessionUser>> {
        self.user.into()
    }

    pub fn is_admin_signal(&self) -> Signal<bool> {
        let user = self.user;
        Signal::derive(move || user.get().is_some_and(|u| u.is_admin()))
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Establishes the session and persists the identity for rehydration.
    pub fn login(&self, user: SessionUser) {
        if let Ok(raw) = serde_json::to_string(&user) {
            self.store.set(USER_STORAGE_KEY, &raw);
        }
        self.set_user.set(Some(user));
    }

    /// Clears identity and credential together, never one without the
    /// other. Navigation is handled by the router's session watcher.
    pub fn logout(&self) {
        self.store.remove(USER_STORAGE_KEY);
        self.tokens.clear();
        self.set_user.set(None);
    }

    /// Server-driven end of session (401). Same cleanup as a logout.
    pub fn expire(&self) {
        self.logout();
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// Full sign-in flow: exchange credentials for a token, persist it, then
/// fetch the account and establish the session.
pub async fn sign_in(
    api: &ReservaApi,
    session: &SessionContext,
    credentials: LoginForm,
) -> Result<SessionUser, GatewayError> {
    let grant = api.login(&credentials).await?;
    session.tokens().set(&grant.access_token);

    let account = api.me().await?;
    let user = SessionUser::from(account);
    session.login(user.clone());
    Ok(user)
}
