use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{HttpRequest, HttpResponse, Method, RetryClass, Transport};
use crate::error::TransportError;

/// Which requests may be repeated, and how long to wait between attempts.
///
/// Policy is data: the decorator only consults these sets. Transaction
/// boundaries are excluded unless `retry_transaction_boundaries` is set,
/// because repeating a commit whose first attempt may have landed can apply
/// it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub retry_statuses: BTreeSet<u16>,
    pub allowed_methods: BTreeSet<Method>,
    pub retry_transport_faults: bool,
    pub retry_transaction_boundaries: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_backoff_ms: 300,
            max_backoff_ms: 10_000,
            retry_statuses: [429, 500, 502, 503, 504].into_iter().collect(),
            allowed_methods: [
                Method::Get,
                Method::Put,
                Method::Delete,
                Method::Head,
                Method::Options,
            ]
            .into_iter()
            .collect(),
            retry_transport_faults: false,
            retry_transaction_boundaries: false,
        }
    }
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn eligible(&self, request: &HttpRequest, attempt: u32) -> bool {
        if attempt > self.max_retries {
            return false;
        }
        let class_allows = match request.retry {
            RetryClass::Standard => true,
            RetryClass::TransactionBoundary => self.retry_transaction_boundaries,
            RetryClass::Never => false,
        };
        class_allows && self.allowed_methods.contains(&request.method)
    }

    /// `attempt` is the 1-based number of the retry about to happen.
    pub fn should_retry_status(&self, request: &HttpRequest, status: u16, attempt: u32) -> bool {
        self.eligible(request, attempt) && self.retry_statuses.contains(&status)
    }

    pub fn should_retry_fault(
        &self,
        request: &HttpRequest,
        fault: &TransportError,
        attempt: u32,
    ) -> bool {
        let retryable_fault = matches!(
            fault,
            TransportError::Timeout(_) | TransportError::Connect(_)
        );
        self.retry_transport_faults && retryable_fault && self.eligible(request, attempt)
    }

    /// Exponential backoff capped at `max_backoff_ms`, with deterministic jitter
    /// of up to a quarter of the baseline.
    pub fn backoff(&self, request: &HttpRequest, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let baseline = self
            .base_backoff_ms
            .saturating_mul(1_u64 << exponent)
            .min(self.max_backoff_ms);
        if baseline == 0 {
            return Duration::ZERO;
        }
        let jitter_bound = (baseline / 4).max(1);
        let seed = format!("{}:{}:{attempt}", request.method, request.path);
        let hash = blake3::hash(seed.as_bytes());
        let bytes = hash.as_bytes();
        let rand = u64::from(u16::from_be_bytes([bytes[0], bytes[1]]));
        let jitter = rand % (jitter_bound + 1);
        Duration::from_millis((baseline + jitter).min(self.max_backoff_ms))
    }
}

/// Transport decorator that repeats requests the policy marks as safe.
#[derive(Debug)]
pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
    sleep: fn(Duration),
}

impl<T: Transport> RetryingTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            sleep: std::thread::sleep,
        }
    }

    pub fn passthrough(inner: T) -> Self {
        Self::new(inner, RetryPolicy::disabled())
    }

    #[cfg(test)]
    pub(crate) fn with_sleep(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for RetryingTransport<T> {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut attempt = 0_u32;
        loop {
            attempt += 1;
            let outcome = self.inner.send(request);
            let retry = match &outcome {
                Ok(response) => self.policy.should_retry_status(request, response.status, attempt),
                Err(fault) => self.policy.should_retry_fault(request, fault, attempt),
            };
            if !retry {
                return outcome;
            }

            let delay = self.policy.backoff(request, attempt);
            let reason = match &outcome {
                Ok(response) => format!("status {}", response.status),
                Err(fault) => fault.to_string(),
            };
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                reason = %reason,
                "retrying request"
            );
            (self.sleep)(delay);
        }
    }

    fn has_session(&self) -> bool {
        self.inner.has_session()
    }

    fn clear_session(&mut self) -> Result<(), TransportError> {
        self.inner.clear_session()
    }
}
