use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::classify::classify;
use crate::error::{AenError, DomainError, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};

use super::AenClient;

fn classify_response(response: &HttpResponse) -> Option<DomainError> {
    classify(response.status, &response.body)
}

impl<T: Transport> AenClient<T> {
    pub(super) fn require_session(&self) -> Result<()> {
        if self.session.authenticated {
            return Ok(());
        }
        Err(DomainError::authentication("no active session; call login first").into())
    }

    /// Sends without a session check. `classify_failure` decides whether the
    /// response is an error; transport faults bypass it.
    pub(super) fn send_classified<F>(
        &mut self,
        operation: &'static str,
        request: HttpRequest,
        classify_failure: F,
    ) -> Result<HttpResponse>
    where
        F: FnOnce(&HttpResponse) -> Option<DomainError>,
    {
        let started = Instant::now();
        tracing::debug!(
            operation,
            method = %request.method,
            path = %request.path,
            "sending request"
        );
        let outcome = match self.transport.send(&request) {
            Ok(response) => match classify_failure(&response) {
                Some(err) => Err(AenError::Domain(err)),
                None => Ok(response),
            },
            Err(fault) => Err(AenError::Transport(fault)),
        };
        self.request_log.record(operation, &request, started, &outcome);
        outcome
    }

    pub(super) fn execute_with<F>(
        &mut self,
        operation: &'static str,
        request: HttpRequest,
        classify_failure: F,
    ) -> Result<HttpResponse>
    where
        F: FnOnce(&HttpResponse) -> Option<DomainError>,
    {
        self.require_session()?;
        let outcome = self.send_classified(operation, request, classify_failure);
        if let Err(AenError::Domain(err)) = &outcome
            && err.status() == Some(401)
        {
            tracing::warn!(operation, "server rejected the session token; dropping local session");
            self.reset_session();
        }
        outcome
    }

    pub(super) fn execute(
        &mut self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<HttpResponse> {
        self.execute_with(operation, request, classify_response)
    }

    pub(super) fn execute_json(
        &mut self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<Value> {
        Ok(self.execute(operation, request)?.json_or_null()?)
    }

    pub(super) fn execute_typed<R: DeserializeOwned>(
        &mut self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<R> {
        Ok(self.execute(operation, request)?.json()?)
    }

    /// Like [`Self::execute_typed`], but an empty 2xx body yields `R::default()`.
    pub(super) fn execute_typed_or_default<R: DeserializeOwned + Default>(
        &mut self,
        operation: &'static str,
        request: HttpRequest,
    ) -> Result<R> {
        match self.execute_json(operation, request)? {
            Value::Null => Ok(R::default()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub(super) fn execute_unit(&mut self, operation: &'static str, request: HttpRequest) -> Result<()> {
        self.execute(operation, request)?;
        Ok(())
    }
}
