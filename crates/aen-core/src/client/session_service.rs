use std::fmt;

use chrono::Utc;

use crate::classify::classify;
use crate::error::{AenError, DomainError, Result};
use crate::params::QueryParams;
use crate::transport::{Credentials, HttpRequest, Transport};

use super::{AenClient, SessionState, TransactionState};

/// Per-call replacements for the credential defaults in [`crate::ClientConfig`].
///
/// An explicit empty `service_id` suppresses the configured default.
#[derive(Clone, Default)]
pub struct LoginOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub service_id: Option<String>,
}

impl fmt::Debug for LoginOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginOverrides")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("service_id", &self.service_id)
            .finish()
    }
}

impl LoginOverrides {
    pub fn credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            service_id: None,
        }
    }

    #[must_use]
    pub fn service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }
}

impl<T: Transport> AenClient<T> {
    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Logs in with the configured credentials.
    pub fn login(&mut self) -> Result<()> {
        self.login_with(LoginOverrides::default())
    }

    /// `GET /user/login` with basic credentials. The server answers with a
    /// session token the transport keeps; later requests carry only that token.
    pub fn login_with(&mut self, overrides: LoginOverrides) -> Result<()> {
        let credentials = self.resolve_credentials(&overrides)?;
        let service_id = overrides
            .service_id
            .or_else(|| self.config.service_id.clone())
            .filter(|value| !value.is_empty());
        let username = credentials.username.clone();
        self.reset_session();

        let request = HttpRequest::get("/user/login")
            .query(QueryParams::new().push_opt("service_id", service_id.as_deref()))
            .basic_auth(credentials);
        self.send_classified("session.login", request, |response| {
            classify(response.status, &response.body)
        })?;

        if !self.transport.has_session() {
            tracing::warn!(
                username = %username,
                "login succeeded but the server did not set a session token"
            );
        }
        tracing::info!(username = %username, service_id = ?service_id, "session established");
        self.session = SessionState {
            authenticated: true,
            username: Some(username),
            service_id,
            established_at: Some(Utc::now()),
        };
        Ok(())
    }

    /// `GET /user/logout`. Local session state and the transport's token are
    /// discarded whatever the server answers, so a repeated logout reaches the
    /// server without a token and reports its rejection.
    pub fn logout(&mut self) -> Result<()> {
        let outcome = self.send_classified(
            "session.logout",
            HttpRequest::get("/user/logout"),
            |response| classify(response.status, &response.body),
        );
        let cleared = self.transport.clear_session();
        let previous = std::mem::take(&mut self.session);
        self.transaction = TransactionState::Idle;
        tracing::info!(
            username = ?previous.username,
            server_ack = outcome.is_ok(),
            "session cleared"
        );

        outcome?;
        cleared?;
        Ok(())
    }

    /// Forgets the local session, any open transaction and the transport's
    /// token. Nothing is sent to the server.
    pub(super) fn reset_session(&mut self) {
        if let Err(err) = self.transport.clear_session() {
            tracing::warn!(error = %err, "failed to clear the transport session");
        }
        self.session = SessionState::default();
        self.transaction = TransactionState::Idle;
    }

    fn resolve_credentials(&self, overrides: &LoginOverrides) -> Result<Credentials> {
        let username = overrides
            .username
            .clone()
            .filter(|value| !value.is_empty())
            .or_else(|| self.config.username.clone())
            .filter(|value| !value.is_empty());
        let password = overrides
            .password
            .clone()
            .filter(|value| !value.is_empty())
            .or_else(|| self.config.password.clone())
            .filter(|value| !value.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(AenError::Domain(DomainError::authentication(
                "username and password are required for login",
            ))),
        }
    }
}
