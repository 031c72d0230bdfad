use tokio::sync::watch;

use super::auth::{AuthError, User};
use super::record_ops::RecordManager;
use super::state::State;

/// What the dashboard may show right now.
#[derive(Debug)]
pub enum Gate<'a> {
    /// Nobody is signed in; only the login / register screen is reachable.
    SignedOut,
    Dashboard {
        user: &'a User,
        records: &'a mut RecordManager,
    },
}

impl Gate<'_> {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Gate::Dashboard { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("identity provider went away")]
    Closed,
}

/**
* Session
* =======
* Follows the identity published by the auth collaborator and keeps
*  a record manager for whoever is signed in. The manager, and with it
*  every record in memory, is dropped the moment the user signs out.
*/
#[derive(Debug)]
pub struct Session {
    state: State,
    identity: watch::Receiver<Option<User>>,
    user: Option<User>,
    records: Option<RecordManager>,
}

impl Session {
    pub fn new(state: State) -> Self {
        let identity = state.auth().subscribe();
        Self {
            state,
            identity,
            user: None,
            records: None,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn gate(&mut self) -> Gate<'_> {
        match (&self.user, &mut self.records) {
            (Some(user), Some(records)) => Gate::Dashboard { user, records },
            _ => Gate::SignedOut,
        }
    }

    /// Catch up with the latest identity. Returns true when the signed-in
    ///  user changed and the record manager was rebuilt or dropped.
    #[tracing::instrument(skip(self))]
    pub async fn sync(&mut self) -> bool {
        let latest = self.identity.borrow_and_update().clone();

        let unchanged = match (&latest, &self.user) {
            (None, None) => true,
            (Some(next), Some(current)) => next.uid == current.uid && self.records.is_some(),
            _ => false,
        };
        if unchanged {
            return false;
        }

        match latest {
            Some(user) => {
                tracing::info!(uid = %user.uid, "opening dashboard");
                let mut records = self.state.record_manager(user.uid.clone());
                // a failed first load already raised a toast
                let _ = records.load().await;
                self.records = Some(records);
                self.user = Some(user);
            }
            None => {
                tracing::info!("closing dashboard");
                self.records = None;
                self.user = None;
            }
        }
        true
    }

    /// Wait for the next identity change, then sync.
    pub async fn changed(&mut self) -> Result<bool, SessionError> {
        self.identity
            .changed()
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(self.sync().await)
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, SessionError> {
        let user = self
            .state
            .auth()
            .register(email, password, display_name)
            .await?;
        self.sync().await;
        Ok(user)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let user = self.state.auth().login(email, password).await?;
        self.sync().await;
        Ok(user)
    }

    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.state.auth().logout().await?;
        self.sync().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use common::prelude::{Priority, RecordForm, Status};

    fn form() -> RecordForm {
        RecordForm {
            title: "Water plants".to_string(),
            description: "Every other day, balcony first".to_string(),
            category: "Home".to_string(),
            priority: Priority::Low,
            status: Status::Active,
        }
    }

    #[tokio::test]
    async fn test_signed_out_by_default() {
        let state = State::from_config(&Config::default()).unwrap();
        let mut session = Session::new(state);

        assert!(!session.sync().await);
        assert!(!session.gate().is_signed_in());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_register_opens_dashboard() {
        let state = State::from_config(&Config::default()).unwrap();
        let mut session = Session::new(state);

        session.register("a@b.io", "secret-pw", "A").await.unwrap();
        match session.gate() {
            Gate::Dashboard { user, records } => {
                assert_eq!(user.email, "a@b.io");
                records.submit(&form(), None).await.unwrap();
                assert_eq!(records.records().len(), 1);
            }
            Gate::SignedOut => panic!("expected dashboard"),
        }
    }

    #[tokio::test]
    async fn test_logout_drops_records_and_login_reloads() {
        let state = State::from_config(&Config::default()).unwrap();
        let mut session = Session::new(state);
        session.register("a@b.io", "secret-pw", "A").await.unwrap();
        if let Gate::Dashboard { records, .. } = session.gate() {
            records.submit(&form(), None).await.unwrap();
        }

        session.logout().await.unwrap();
        assert!(matches!(session.gate(), Gate::SignedOut));

        session.login("a@b.io", "secret-pw").await.unwrap();
        match session.gate() {
            Gate::Dashboard { records, .. } => assert_eq!(records.records().len(), 1),
            Gate::SignedOut => panic!("expected dashboard"),
        }
    }

    #[tokio::test]
    async fn test_changed_follows_external_sign_in() {
        let state = State::from_config(&Config::default()).unwrap();
        let auth = state.auth().clone();
        let mut session = Session::new(state);

        auth.register("a@b.io", "secret-pw", "A").await.unwrap();
        assert!(session.changed().await.unwrap());
        assert!(session.gate().is_signed_in());
    }

    #[tokio::test]
    async fn test_bad_login_stays_signed_out() {
        let state = State::from_config(&Config::default()).unwrap();
        let mut session = Session::new(state);

        let err = session.login("a@b.io", "whatever").await.unwrap_err();
        assert!(matches!(err, SessionError::Auth(AuthError::InvalidCredentials)));
        assert!(!session.gate().is_signed_in());
    }
}
