use crate::classify::{TransactionPhase, classify_with_overrides, find_override};
use crate::error::{AenError, Result};
use crate::transport::{HttpRequest, RetryClass, Transport};

use super::{AenClient, TransactionState};

const fn operation_name(phase: TransactionPhase) -> &'static str {
    match phase {
        TransactionPhase::Begin => "transaction.begin",
        TransactionPhase::Commit => "transaction.commit",
        TransactionPhase::Rollback => "transaction.rollback",
    }
}

const fn state_after(phase: TransactionPhase) -> TransactionState {
    match phase {
        TransactionPhase::Begin => TransactionState::Open,
        TransactionPhase::Commit | TransactionPhase::Rollback => TransactionState::Idle,
    }
}

impl<T: Transport> AenClient<T> {
    pub fn transaction_state(&self) -> TransactionState {
        self.transaction
    }

    /// `PUT /session/transaction/begin`. A 409 means one is already open and is
    /// reported as `Conflict`.
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.transition(TransactionPhase::Begin)
    }

    /// A 409 means nothing was open and is reported as `TransactionProtocol`.
    pub fn commit_transaction(&mut self) -> Result<()> {
        self.transition(TransactionPhase::Commit)
    }

    pub fn rollback_transaction(&mut self) -> Result<()> {
        self.transition(TransactionPhase::Rollback)
    }

    // The request is always sent; local state never short-circuits it.
    fn transition(&mut self, phase: TransactionPhase) -> Result<()> {
        let request = HttpRequest::put(phase.path()).retry_class(RetryClass::TransactionBoundary);
        let outcome = self.execute_with(operation_name(phase), request, |response| {
            classify_with_overrides(phase, response.status, &response.body)
        });

        match &outcome {
            Ok(_) => {
                self.transaction = state_after(phase);
                tracing::info!(phase = phase.as_str(), state = ?self.transaction, "transaction transition");
            }
            // 409 proves the server's state: open on begin, absent on commit/rollback.
            Err(AenError::Domain(err))
                if err
                    .status()
                    .is_some_and(|status| find_override(phase, status).is_some()) =>
            {
                let server_state = state_after(phase);
                if self.transaction != server_state {
                    tracing::warn!(
                        phase = phase.as_str(),
                        local = ?self.transaction,
                        server = ?server_state,
                        "resynchronising local transaction state"
                    );
                }
                self.transaction = server_state;
            }
            Err(_) => {}
        }
        outcome.map(|_| ())
    }
}
