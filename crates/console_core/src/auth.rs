//! Pluggable sign-in capability for the console.
//!
//! The login flow depends only on the `Authenticator` trait; which backend
//! actually vouches for the credentials is deployment wiring. The shipped
//! implementation compares against configured admin credentials.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An authenticated console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please input your email!")]
    MissingEmail,
    #[error("Please enter a valid email!")]
    MalformedEmail,
    #[error("Please input your password!")]
    MissingPassword,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Checks credentials against a configured admin identity. Input shape is
/// validated before the comparison so the caller can surface field-level
/// feedback in the same order the login form does.
pub struct ConfiguredAuthenticator {
    admin_email: String,
    admin_password: String,
}

impl ConfiguredAuthenticator {
    pub fn new(admin_email: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
            admin_password: admin_password.into(),
        }
    }
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), AuthError> {
    if credentials.email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    if !credentials.email.contains('@') {
        return Err(AuthError::MalformedEmail);
    }
    if credentials.password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

#[async_trait]
impl Authenticator for ConfiguredAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        validate_credentials(credentials)?;
        if credentials.email != self.admin_email || credentials.password != self.admin_password {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Session {
            email: credentials.email.clone(),
            started_at: Utc::now(),
        })
    }
}
