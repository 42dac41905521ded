//! Bounded retry policy for model calls
//!
//! The agent loop retries a failed model call a fixed number of times before
//! abandoning the turn. Two failure classes get different backoffs: a reply
//! that arrived but would not parse (short pause, the model usually fixes
//! itself), and a call that failed outright (longer pause for transient API
//! conditions).

use std::time::Duration;

/// Pause after a reply that failed to parse.
const PARSE_BACKOFF: Duration = Duration::from_secs(1);

/// Pause after a failed API call.
const API_BACKOFF: Duration = Duration::from_secs(2);

/// Bounded retry schedule for the model-call step.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use echoclaw::agent::RetryPolicy;
///
/// let policy = RetryPolicy::new(3);
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.parse_backoff(), Duration::from_secs(1));
/// assert_eq!(policy.api_backoff(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    parse_backoff: Duration,
    api_backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy with the default backoff schedule.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            parse_backoff: PARSE_BACKOFF,
            api_backoff: API_BACKOFF,
        }
    }

    /// Override both backoffs, e.g. to zero in tests.
    pub fn with_backoffs(mut self, parse_backoff: Duration, api_backoff: Duration) -> Self {
        self.parse_backoff = parse_backoff;
        self.api_backoff = api_backoff;
        self
    }

    /// Total call attempts before the turn is abandoned.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether `attempt` (1-based) was the last allowed attempt.
    pub fn is_final(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }

    /// Pause before retrying an unparseable reply.
    pub fn parse_backoff(&self) -> Duration {
        self.parse_backoff
    }

    /// Pause before retrying a failed API call.
    pub fn api_backoff(&self) -> Duration {
        self.api_backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.parse_backoff(), Duration::from_secs(1));
        assert_eq!(policy.api_backoff(), Duration::from_secs(2));
    }

    #[test]
    fn test_is_final() {
        let policy = RetryPolicy::new(3);
        assert!(!policy.is_final(1));
        assert!(!policy.is_final(2));
        assert!(policy.is_final(3));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::new(0);
        assert_eq!(policy.max_attempts(), 1);
        assert!(policy.is_final(1));
    }

    #[test]
    fn test_with_backoffs() {
        let policy = RetryPolicy::new(3).with_backoffs(Duration::ZERO, Duration::ZERO);
        assert_eq!(policy.parse_backoff(), Duration::ZERO);
        assert_eq!(policy.api_backoff(), Duration::ZERO);
        assert_eq!(policy.max_attempts(), 3);
    }
}
