//! Bounded retry for fallible async operations

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy for asset downloads
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt bound
    ///
    /// `max_attempts` counts every try including the first and is clamped to
    /// at least 1. A zero `backoff` retries immediately.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// All attempts permitted by a [`RetryPolicy`] failed
#[derive(Debug)]
pub struct RetryExhausted<E> {
    /// Number of attempts made
    pub attempts: u32,
    /// Error from the final attempt
    pub last_error: E,
}

/// Runs `op` until it succeeds or the policy's attempt bound is reached
///
/// `op` receives the 1-based attempt number. Failed attempts are logged at
/// warn level. The backoff delay is awaited between attempts, never after
/// the last one.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!("Attempt {}/{} failed: {}", attempt, policy.max_attempts, e);

                if attempt >= policy.max_attempts {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                attempt += 1;
                if !policy.backoff.is_zero() {
                    tokio::time::sleep(policy.backoff).await;
                }
            }
        }
    }
}
