// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    error::Result,
    model::user::User,
    storage::{self, Storage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY},
};

#[derive(Default)]
struct State {
    token: Option<SecretString>,
    refresh_token: Option<SecretString>,
    user: Option<User>,
}

/// Who is signed in, held in memory and written through to durable storage.
///
/// Reads never leave memory. Mutations update memory and then the storage, and
/// return once both are done.
pub(crate) struct Session {
    state: RwLock<State>,
    storage: Box<dyn Storage>,
}

impl Session {
    /// Builds a session from whatever a previous run left in `storage`.
    pub(crate) async fn hydrate(storage: Box<dyn Storage>) -> Result<Self> {
        let token = non_empty(storage.get(ACCESS_TOKEN_KEY).await?);
        let refresh_token = non_empty(storage.get(REFRESH_TOKEN_KEY).await?);
        let user = match storage.get(USER_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| warn!("Ignoring the stored user profile because it is unreadable: {}", e))
                .ok(),
            None => None,
        };
        debug!(
            "Hydrated session from {} storage (authenticated: {})",
            if storage.is_persistent() { "persistent" } else { "ephemeral" },
            token.is_some()
        );

        Ok(Self {
            state: RwLock::new(State {
                token,
                refresh_token,
                user,
            }),
            storage,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn token(&self) -> Option<SecretString> {
        self.read().token.clone()
    }

    pub(crate) fn refresh_token(&self) -> Option<SecretString> {
        self.read().refresh_token.clone()
    }

    pub(crate) fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Stores the access token. An empty token signs the session out of the
    /// token alone, leaving the profile untouched.
    pub(crate) async fn set_token(&self, token: SecretString) -> Result<()> {
        let token = non_empty(Some(token.expose_secret().clone()));
        self.write().token = token.clone();
        match token {
            Some(token) => self.storage.set(ACCESS_TOKEN_KEY, token.expose_secret()).await,
            None => self.storage.remove(ACCESS_TOKEN_KEY).await,
        }
    }

    pub(crate) async fn set_refresh_token(&self, token: SecretString) -> Result<()> {
        let token = non_empty(Some(token.expose_secret().clone()));
        self.write().refresh_token = token.clone();
        match token {
            Some(token) => {
                self.storage
                    .set(REFRESH_TOKEN_KEY, token.expose_secret())
                    .await
            }
            None => self.storage.remove(REFRESH_TOKEN_KEY).await,
        }
    }

    pub(crate) async fn set_user_info(&self, user: User) -> Result<()> {
        let serialized = serde_json::to_string(&user)?;
        self.write().user = Some(user);
        self.storage.set(USER_KEY, &serialized).await
    }

    /// Forgets everything about the signed-in user. Calling this on a session
    /// that is already signed out changes nothing.
    pub(crate) async fn logout(&self) -> Result<()> {
        *self.write() = State::default();
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            self.storage.remove(key).await?;
        }
        debug!("Cleared session");
        Ok(())
    }

    pub(crate) fn is_persistent(&self) -> bool {
        storage::IsPersistent::is_persistent(&self.storage)
    }
}

fn non_empty(value: Option<String>) -> Option<SecretString> {
    value.filter(|v| !v.is_empty()).map(SecretString::new)
}
