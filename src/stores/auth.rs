use crate::models::User;
use crate::sources::AuthBackend;
use crate::storage::{self, KeyValueStorage, AUTH_NAMESPACE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Persisted part of the state
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Persisted {
    user: Option<User>,
    is_authenticated: bool,
}

/// Session of the single current user
pub struct AuthStore {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn KeyValueStorage>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(backend: Arc<dyn AuthBackend>, storage: Arc<dyn KeyValueStorage>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            backend,
            storage,
            state,
        }
    }

    /// Current snapshot. Do not hold it across an await.
    pub fn state(&self) -> watch::Ref<'_, AuthState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// Reload the session persisted by a previous run
    pub async fn restore(&self) -> storage::Result<()> {
        if let Some(persisted) =
            storage::load::<Persisted>(self.storage.as_ref(), AUTH_NAMESPACE).await?
        {
            debug!("Restored session, authenticated: {}", persisted.is_authenticated);
            self.state.send_modify(|state| {
                state.user = persisted.user;
                state.is_authenticated = persisted.is_authenticated;
            });
        }
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) {
        debug!("Logging in {}", email);
        self.begin_loading();

        let result = self.backend.login(email, password).await;
        self.finish("login", result).await;
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) {
        debug!("Registering {}", email);
        self.begin_loading();

        let result = self.backend.register(name, email, password).await;
        self.finish("registration", result).await;
    }

    pub async fn logout(&self) {
        self.state.send_modify(|state| {
            state.user = None;
            state.is_authenticated = false;
        });
        info!("Logged out");
        self.persist().await;
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    fn begin_loading(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    async fn finish(&self, action: &str, result: Result<User>) {
        match result {
            Ok(user) => {
                info!("{} succeeded for {}", action, user.email);
                self.state.send_modify(|state| {
                    state.user = Some(user);
                    state.is_authenticated = true;
                    state.is_loading = false;
                });
            }
            Err(err) => {
                warn!("{} failed: {}", action, err);
                self.state.send_modify(|state| {
                    state.error = Some(err.to_string());
                    state.is_loading = false;
                });
            }
        }
        self.persist().await;
    }

    async fn persist(&self) {
        let persisted = {
            let state = self.state.borrow();
            Persisted {
                user: state.user.clone(),
                is_authenticated: state.is_authenticated,
            }
        };

        if let Err(err) = storage::save(self.storage.as_ref(), AUTH_NAMESPACE, &persisted).await {
            warn!("Failed to persist session: {}", err);
        }
    }
}
