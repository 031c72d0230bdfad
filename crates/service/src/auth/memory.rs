use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tokio::sync::watch;
use uuid::Uuid;

use common::prelude::OwnerId;

use super::{AuthError, AuthProvider, User};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_digest: String,
}

/// In-process accounts. Stands in for the hosted identity service in
///  the CLI and in tests.
#[derive(Clone)]
pub struct MemoryAuth {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    identity: Arc<watch::Sender<Option<User>>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            identity: Arc::new(identity),
        }
    }
}

impl std::fmt::Debug for MemoryAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAuth")
            .field("accounts", &self.accounts.lock().len())
            .field("current", &self.identity.borrow().as_ref().map(|u| u.uid.clone()))
            .finish()
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn digest(email: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(email.as_bytes());
        hasher.update([0u8]);
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn normalize_email(email: &str) -> Result<String, AuthError> {
        let email = email.trim().to_lowercase();
        let valid = matches!(
            email.split_once('@'),
            Some((local, domain)) if !local.is_empty() && domain.contains('.')
        );
        if valid {
            Ok(email)
        } else {
            Err(AuthError::InvalidEmail(email))
        }
    }

    fn publish(&self, user: Option<User>) {
        self.identity.send_replace(user);
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    fn current_user(&self) -> Option<User> {
        self.identity.borrow().clone()
    }

    #[tracing::instrument(skip(self, password))]
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        let email = Self::normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::WeakPassword);
        }

        let user = {
            let mut accounts = self.accounts.lock();
            if accounts.contains_key(&email) {
                return Err(AuthError::EmailInUse(email));
            }

            let user = User {
                uid: OwnerId::new(Uuid::new_v4().simple().to_string()),
                email: email.clone(),
                display_name: display_name.trim().to_string(),
            };
            accounts.insert(
                email.clone(),
                Account {
                    user: user.clone(),
                    password_digest: Self::digest(&email, password),
                },
            );
            user
        };

        tracing::info!(uid = %user.uid, "account registered");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Self::normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = {
            let accounts = self.accounts.lock();
            let account = accounts.get(&email).ok_or(AuthError::InvalidCredentials)?;
            if account.password_digest != Self::digest(&email, password) {
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };

        tracing::info!(uid = %user.uid, "signed in");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        if self.identity.borrow().is_some() {
            tracing::info!("signed out");
        }
        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.identity.subscribe()
    }
}
