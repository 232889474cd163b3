//! Opt-in bounded retry around any grocery fulfilment adapter.
//!
//! Only failures that happened before the fulfilment service answered are
//! retried. A status error or an unparsable body means the service saw the
//! request, and resubmitting could place a second order, so those are
//! returned as-is. With the default single attempt the decorator behaves
//! exactly like the wrapped adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::warn;

use crate::domain::AggregatedItem;
use crate::domain::ports::{CheckoutResult, GroceryFulfilment};

/// Attempt and backoff limits for order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first call. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Upper bound for the exponential delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Exponential delay before attempt `attempt + 1`, capped at `max_backoff`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use checkout_backend::domain::RetryPolicy;
    ///
    /// let policy = RetryPolicy {
    ///     max_attempts: 4,
    ///     initial_backoff: Duration::from_millis(100),
    ///     max_backoff: Duration::from_millis(250),
    /// };
    /// assert_eq!(policy.base_delay(1), Duration::from_millis(100));
    /// assert_eq!(policy.base_delay(2), Duration::from_millis(200));
    /// assert_eq!(policy.base_delay(3), Duration::from_millis(250));
    /// ```
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }
}

/// Async sleeping abstraction so tests can observe delays without waiting.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Jitter applied on top of the exponential base delay.
pub trait BackoffJitter: Send + Sync {
    /// Return the delay to actually wait.
    fn jittered_delay(&self, base: Duration) -> Duration;
}

/// Adds up to a quarter of the base delay, drawn uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl BackoffJitter for RandomJitter {
    fn jittered_delay(&self, base: Duration) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let extra = rand::thread_rng().gen_range(0..=base_ms / 4);
        Duration::from_millis(base_ms.saturating_add(extra))
    }
}

/// Grocery fulfilment decorator retrying transport-level failures.
pub struct RetryingGroceryFulfilment<G> {
    inner: Arc<G>,
    policy: RetryPolicy,
    sleeper: Arc<dyn RetrySleeper>,
    jitter: Arc<dyn BackoffJitter>,
}

impl<G> RetryingGroceryFulfilment<G> {
    /// Wrap `inner` using Tokio sleeping and random jitter.
    pub fn new(inner: Arc<G>, policy: RetryPolicy) -> Self {
        Self::with_runtime(inner, policy, Arc::new(TokioSleeper), Arc::new(RandomJitter))
    }

    /// Wrap `inner` with explicit sleeping and jitter strategies.
    pub fn with_runtime(
        inner: Arc<G>,
        policy: RetryPolicy,
        sleeper: Arc<dyn RetrySleeper>,
        jitter: Arc<dyn BackoffJitter>,
    ) -> Self {
        Self {
            inner,
            policy,
            sleeper,
            jitter,
        }
    }
}

#[async_trait]
impl<G> GroceryFulfilment for RetryingGroceryFulfilment<G>
where
    G: GroceryFulfilment,
{
    async fn place_order(&self, items: &[AggregatedItem]) -> CheckoutResult {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.inner.place_order(items).await {
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    let delay = self.jitter.jittered_delay(self.policy.base_delay(attempt));
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "retrying grocery order after transport failure"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Retry classification and backoff coverage.

    use std::sync::Mutex;

    use super::*;
    use crate::domain::ports::{GroceryFulfilmentError, MockGroceryFulfilment, PlacedOrder};
    use rstest::rstest;

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl RetrySleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().expect("delays mutex").push(duration);
        }
    }

    struct NoJitter;

    impl BackoffJitter for NoJitter {
        fn jittered_delay(&self, base: Duration) -> Duration {
            base
        }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(1_000),
        }
    }

    fn order() -> PlacedOrder {
        PlacedOrder {
            order_id: "order-1".to_owned(),
            message: "ok".to_owned(),
            items: Vec::new(),
        }
    }

    fn decorate(
        inner: MockGroceryFulfilment,
        max_attempts: u32,
    ) -> (RetryingGroceryFulfilment<MockGroceryFulfilment>, Arc<RecordingSleeper>) {
        let sleeper = Arc::new(RecordingSleeper::default());
        let retrying = RetryingGroceryFulfilment::with_runtime(
            Arc::new(inner),
            policy(max_attempts),
            sleeper.clone(),
            Arc::new(NoJitter),
        );
        (retrying, sleeper)
    }

    #[rstest]
    #[tokio::test]
    async fn default_policy_makes_a_single_attempt() {
        let mut inner = MockGroceryFulfilment::new();
        inner
            .expect_place_order()
            .times(1)
            .returning(|_| Err(GroceryFulfilmentError::transport("connection refused")));
        let (retrying, sleeper) = decorate(inner, RetryPolicy::default().max_attempts);

        let error = retrying.place_order(&[]).await.expect_err("single failure");

        assert!(matches!(error, GroceryFulfilmentError::Transport { .. }));
        assert!(sleeper.delays.lock().expect("delays mutex").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn transport_failures_retry_with_exponential_backoff() {
        let mut inner = MockGroceryFulfilment::new();
        let mut calls = 0;
        inner.expect_place_order().times(3).returning(move |_| {
            calls += 1;
            if calls < 3 {
                Err(GroceryFulfilmentError::timeout("deadline elapsed"))
            } else {
                Ok(order())
            }
        });
        let (retrying, sleeper) = decorate(inner, 3);

        let placed = retrying.place_order(&[]).await.expect("third attempt succeeds");

        assert_eq!(placed.order_id, "order-1");
        assert_eq!(
            *sleeper.delays.lock().expect("delays mutex"),
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[rstest]
    #[case::status(GroceryFulfilmentError::status(400_u16, "status 400"))]
    #[case::server_status(GroceryFulfilmentError::status(503_u16, "status 503"))]
    #[case::malformed(GroceryFulfilmentError::malformed_response("eof"))]
    #[case::interrupted_body(GroceryFulfilmentError::interrupted("connection reset by peer"))]
    #[tokio::test]
    async fn answered_requests_are_never_retried(#[case] failure: GroceryFulfilmentError) {
        let mut inner = MockGroceryFulfilment::new();
        let returned = failure.clone();
        inner
            .expect_place_order()
            .times(1)
            .returning(move |_| Err(returned.clone()));
        let (retrying, _sleeper) = decorate(inner, 5);

        let error = retrying.place_order(&[]).await.expect_err("no retry");

        assert_eq!(error, failure);
    }

    #[rstest]
    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let mut inner = MockGroceryFulfilment::new();
        inner
            .expect_place_order()
            .times(2)
            .returning(|_| Err(GroceryFulfilmentError::transport("dns failure")));
        let (retrying, sleeper) = decorate(inner, 2);

        let error = retrying.place_order(&[]).await.expect_err("exhausted");

        assert_eq!(error.reason(), "transport error: dns failure");
        assert_eq!(sleeper.delays.lock().expect("delays mutex").len(), 1);
    }

    #[rstest]
    fn random_jitter_stays_within_a_quarter() {
        let base = Duration::from_millis(400);
        for _ in 0..32 {
            let delay = RandomJitter.jittered_delay(base);
            assert!(delay >= base && delay <= Duration::from_millis(500));
        }
    }
}
