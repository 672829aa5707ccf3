use std::time::Duration;

use tracing::warn;

use crate::errors::NewsResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay after the failed attempt `attempt_index` (0-based): `base * 2^index`
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay
            .saturating_mul(1u32 << attempt_index.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// The closure receives the 0-based attempt index. There is no jitter and no
/// overall deadline; the last error is returned as-is.
pub fn retry_with_backoff<T, F>(policy: &RetryPolicy, mut operation: F) -> NewsResult<T>
where
    F: FnMut(u32) -> NewsResult<T>,
{
    let mut attempt = 0;
    loop {
        match operation(attempt) {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt + 1 >= policy.max_attempts {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed, backing off"
                );
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                attempt += 1;
            }
        }
    }
}
