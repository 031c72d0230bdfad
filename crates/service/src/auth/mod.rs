use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use common::prelude::OwnerId;

mod memory;

pub use memory::MemoryAuth;

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: OwnerId,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("email already in use: {0}")]
    EmailInUse(String),
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Hosted identity service consumed by the dashboard.
///
/// Every identity change (register, login, logout) is published to
///  the receivers handed out by [`AuthProvider::subscribe`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    fn subscribe(&self) -> watch::Receiver<Option<User>>;
}
