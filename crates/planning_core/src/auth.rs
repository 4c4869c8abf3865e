//! Actor resolution for transition callers.
//!
//! # Responsibility
//! - Define the authenticator contract consumed by the transition service.
//! - Provide a session-record implementation keyed by the configured id field.
//!
//! # Invariants
//! - `current_actor(true)` never returns `Ok(None)`.

use crate::model::actor::Actor;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// An actor was required but none could be resolved.
    AuthenticationRequired,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationRequired => write!(f, "authentication required"),
        }
    }
}

impl Error for AuthError {}

/// Resolves the actor behind the current request.
pub trait Authenticator {
    /// Returns the current actor.
    ///
    /// When `required` is true and no actor is resolvable, fails with
    /// `AuthError::AuthenticationRequired` instead of returning `None`.
    fn current_actor(&self, required: bool) -> Result<Option<Actor>, AuthError>;
}

/// Authenticator over an already-loaded session user record.
#[derive(Debug, Clone, Default)]
pub struct SessionAuthenticator {
    user: Option<Map<String, Value>>,
    id_field: String,
}

impl SessionAuthenticator {
    pub fn new(user: Option<Map<String, Value>>, id_field: impl Into<String>) -> Self {
        Self {
            user,
            id_field: id_field.into(),
        }
    }

    /// Session with no logged-in user.
    pub fn anonymous(id_field: impl Into<String>) -> Self {
        Self::new(None, id_field)
    }
}

impl Authenticator for SessionAuthenticator {
    fn current_actor(&self, required: bool) -> Result<Option<Actor>, AuthError> {
        let actor = self
            .user
            .as_ref()
            .and_then(|record| Actor::from_record(record, &self.id_field));
        match actor {
            None if required => Err(AuthError::AuthenticationRequired),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthError, Authenticator, SessionAuthenticator};
    use serde_json::json;

    #[test]
    fn anonymous_session_fails_only_when_required() {
        let auth = SessionAuthenticator::anonymous("_id");
        assert_eq!(auth.current_actor(false), Ok(None));
        assert_eq!(
            auth.current_actor(true),
            Err(AuthError::AuthenticationRequired)
        );
    }

    #[test]
    fn session_user_resolves_with_configured_field() {
        let user = json!({"username": "U1"}).as_object().cloned();
        let auth = SessionAuthenticator::new(user, "username");
        let actor = auth
            .current_actor(true)
            .expect("actor should resolve")
            .expect("required actor is present");
        assert_eq!(actor.id, "U1");
    }

    #[test]
    fn session_user_without_id_field_is_unauthenticated() {
        let user = json!({"username": "U1"}).as_object().cloned();
        let auth = SessionAuthenticator::new(user, "_id");
        assert_eq!(
            auth.current_actor(true),
            Err(AuthError::AuthenticationRequired)
        );
    }
}
