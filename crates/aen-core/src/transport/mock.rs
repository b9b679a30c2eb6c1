use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;

#[derive(Debug, Clone)]
pub(crate) struct SentRequest {
    pub(crate) request: HttpRequest,
    pub(crate) had_session: bool,
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<Result<HttpResponse, TransportError>>,
    sent: Vec<SentRequest>,
    session: bool,
}

/// Scripted transport for tests. Clones share state, so a test can keep one
/// handle while the client owns another.
///
/// A successful `/user/login` response acts like `Set-Cookie`: it grants a
/// session token that is reported on every later request until cleared.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_status(&self, status: u16, body: &str) {
        self.push_response(HttpResponse::new(status, body.as_bytes().to_vec()));
    }

    pub(crate) fn push_response(&self, response: HttpResponse) {
        self.state.borrow_mut().queued.push_back(Ok(response));
    }

    pub(crate) fn push_fault(&self, fault: TransportError) {
        self.state.borrow_mut().queued.push_back(Err(fault));
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.borrow().sent.len()
    }

    pub(crate) fn sent(&self) -> Vec<SentRequest> {
        self.state.borrow().sent.clone()
    }

    pub(crate) fn last(&self) -> Option<SentRequest> {
        self.state.borrow().sent.last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.borrow_mut();
        let had_session = state.session;
        state.sent.push(SentRequest {
            request: request.clone(),
            had_session,
        });
        let outcome = state
            .queued
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connect("no scripted response".to_string())));
        if request.path == "/user/login"
            && matches!(&outcome, Ok(response) if response.is_success())
        {
            state.session = true;
        }
        outcome
    }

    fn has_session(&self) -> bool {
        self.state.borrow().session
    }

    fn clear_session(&mut self) -> Result<(), TransportError> {
        self.state.borrow_mut().session = false;
        Ok(())
    }
}
