//! Identity boundary and the navigation rule that follows sign-in.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::error::RemoteError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, if a session exists.
    async fn current_user(&self) -> Result<Option<User>, RemoteError>;
    async fn sign_in(&self, name: &str) -> Result<User, RemoteError>;
    async fn sign_out(&self) -> Result<(), RemoteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(User),
    NotAuthenticated,
}

impl From<Option<User>> for AuthOutcome {
    fn from(user: Option<User>) -> Self {
        match user {
            Some(user) => AuthOutcome::Authenticated(user),
            None => AuthOutcome::NotAuthenticated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    Login,
    #[default]
    Tasks,
    Projects,
    ProjectDetail(String),
}

/// Where to go once the identity check settles.
pub fn route_after_auth(outcome: &AuthOutcome, requested: Option<Route>) -> Route {
    match outcome {
        AuthOutcome::NotAuthenticated => Route::Login,
        AuthOutcome::Authenticated(_) => match requested {
            None | Some(Route::Login) => Route::default(),
            Some(route) => route,
        },
    }
}

/// Single-user identity kept in a session file next to the config.
#[derive(Debug, Clone)]
pub struct LocalIdentity {
    session_path: PathBuf,
}

impl LocalIdentity {
    pub fn new(session_path: impl Into<PathBuf>) -> Self {
        Self {
            session_path: session_path.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn current_user(&self) -> Result<Option<User>, RemoteError> {
        match fs::read_to_string(&self.session_path).await {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn sign_in(&self, name: &str) -> Result<User, RemoteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RemoteError::Identity("user name cannot be empty".to_string()));
        }
        let user = User {
            name: name.to_string(),
        };
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.session_path, serde_json::to_string(&user)?).await?;
        info!(user = %user.name, "signed in");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        match fs::remove_file(&self.session_path).await {
            Ok(()) => {
                info!("signed out");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
