use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{KeyValueStore, TOKEN_KEY, load_state, save_state};
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::AdminUser;
use crate::resources::auth::LoginResponse;
use crate::transport::Transport;

pub const AUTH_STATE_KEY: &str = "admin-auth";

/// Persisted part of the admin session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    pub user: Option<AdminUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

/// Admin session. The raw token is also kept under [`TOKEN_KEY`], which is
/// what the client reads and what a 401 clears.
pub struct AuthStore {
    store: Arc<dyn KeyValueStore>,
    state: AuthState,
    is_loading: bool,
}

impl AuthStore {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let state = load_state(store.as_ref(), AUTH_STATE_KEY)?;
        Ok(Self {
            store,
            state,
            is_loading: false,
        })
    }

    pub fn save(&self) -> Result<()> {
        save_state(self.store.as_ref(), AUTH_STATE_KEY, &self.state)
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&AdminUser> {
        self.state.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Authenticate against the backend and persist the session.
    /// On failure the previous session is left as it was.
    pub async fn login<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        email: &str,
        password: &str,
    ) -> Result<()> {
        self.is_loading = true;
        let result = client.login(email, password).await;
        self.is_loading = false;

        let LoginResponse { user, token } = result?;
        self.store.set(TOKEN_KEY, &token)?;
        info!(user = %user.email, "admin signed in");
        self.state = AuthState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        };
        self.save()
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.state = AuthState::default();
        info!("admin signed out");
        self.save()
    }

    /// Drop the authenticated flag when the raw token is gone (e.g. cleared by a 401).
    pub fn check_auth(&mut self) -> Result<bool> {
        if self.store.get(TOKEN_KEY)?.is_none() && self.state.is_authenticated {
            debug!("no stored token, session is no longer authenticated");
            self.state.is_authenticated = false;
            self.save()?;
        }
        Ok(self.state.is_authenticated)
    }
}
