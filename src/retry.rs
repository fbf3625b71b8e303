use crate::error::WorkflowError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Bounded retry policy for repository reads.
///
/// Defines how many attempts a read is given and how long to wait between
/// them. The policy object drives a plain loop in the caller; there is no
/// recursive self-scheduling. Mutation calls are never routed through a
/// retry policy.
///
/// # Examples
///
/// ```
/// use nagare::RetryPolicy;
/// use std::time::Duration;
///
/// // Single attempt, no retry (default)
/// let policy = RetryPolicy::None;
///
/// // Fixed delay: up to 3 attempts, 1 second apart
/// let policy = RetryPolicy::fixed(3, Duration::from_secs(1));
///
/// // Linearly increasing backoff: 1s after the first failure, 2s after
/// // the second - the dashboard read schedule
/// let policy = RetryPolicy::linear(3, Duration::from_secs(1));
/// assert_eq!(policy, RetryPolicy::dashboard_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Single attempt - fail immediately on error.
    #[default]
    None,
    /// Fixed delay between attempts.
    Fixed {
        /// Total number of attempts, including the first.
        max_attempts: u32,
        /// Delay between attempts.
        delay: Duration,
    },
    /// Linearly increasing delay between attempts.
    Linear {
        /// Total number of attempts, including the first.
        max_attempts: u32,
        /// Delay after the first failure; grows to 2x, 3x, ... after
        /// subsequent failures.
        initial_delay: Duration,
    },
}

impl RetryPolicy {
    /// Creates a fixed-delay policy.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        RetryPolicy::Fixed {
            max_attempts,
            delay,
        }
    }

    /// Creates a linear-backoff policy.
    pub fn linear(max_attempts: u32, initial_delay: Duration) -> Self {
        RetryPolicy::Linear {
            max_attempts,
            initial_delay,
        }
    }

    /// The policy a dashboard-style read path uses: 3 attempts with
    /// linearly increasing backoff starting at one second.
    pub fn dashboard_default() -> Self {
        RetryPolicy::linear(3, Duration::from_secs(1))
    }

    /// Total number of attempts, including the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use nagare::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// assert_eq!(RetryPolicy::None.max_attempts(), 1);
    /// assert_eq!(RetryPolicy::fixed(3, Duration::from_secs(1)).max_attempts(), 3);
    /// ```
    pub fn max_attempts(&self) -> u32 {
        match self {
            RetryPolicy::None => 1,
            RetryPolicy::Fixed { max_attempts, .. } => (*max_attempts).max(1),
            RetryPolicy::Linear { max_attempts, .. } => (*max_attempts).max(1),
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    ///
    /// # Examples
    ///
    /// ```
    /// use nagare::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::linear(3, Duration::from_secs(1));
    /// assert_eq!(policy.delay_for_attempt(0), Some(Duration::from_secs(1)));
    /// assert_eq!(policy.delay_for_attempt(1), Some(Duration::from_secs(2)));
    /// assert_eq!(RetryPolicy::None.delay_for_attempt(0), None);
    /// ```
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Fixed { delay, .. } => Some(*delay),
            RetryPolicy::Linear { initial_delay, .. } => {
                Some(*initial_delay * (attempt + 1))
            }
        }
    }
}

/// Runs `op` under `policy`, retrying transient failures.
///
/// Only errors whose [`WorkflowError::is_transient`] is true are retried;
/// anything else is returned immediately. After the attempt cap the last
/// transient error becomes the terminal result.
///
/// # Examples
///
/// ```
/// use nagare::{retry_with_policy, InMemoryRepository, RetryPolicy, WorkflowRepository};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), nagare::WorkflowError> {
/// let repo = InMemoryRepository::new();
/// let policy = RetryPolicy::fixed(3, Duration::from_millis(10));
/// let workflows = retry_with_policy(&policy, || repo.list()).await?;
/// assert!(workflows.is_empty());
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, WorkflowError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, WorkflowError>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt + 1 < max_attempts => {
                let delay = policy.delay_for_attempt(attempt).unwrap_or_default();
                warn!(
                    "Attempt {}/{} failed transiently, retrying in {:?}: {}",
                    attempt + 1,
                    max_attempts,
                    delay,
                    error
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
