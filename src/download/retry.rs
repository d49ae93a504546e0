//! Per-artifact attempt budget.
//!
//! A [`RetryPolicy`] caps how many download+verify attempts an artifact gets
//! before its release is abandoned. Attempts run back to back: there is no
//! backoff or jitter between them.
//!
//! # Example
//!
//! ```
//! use image_sync_core::download::RetryPolicy;
//!
//! let policy = RetryPolicy::with_max_attempts(2);
//! let attempts: Vec<u32> = policy.attempts().collect();
//! assert_eq!(attempts, [1, 2]);
//! assert!(policy.is_final_attempt(2));
//! ```

use std::ops::RangeInclusive;

/// Default maximum attempts per artifact.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Attempt budget for a single artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one. Always >= 1.
    max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy allowing `max_attempts` attempts (clamped to at least 1).
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the maximum number of attempts configured.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 1-based attempt numbers, in order.
    #[must_use]
    pub fn attempts(&self) -> RangeInclusive<u32> {
        1..=self.max_attempts
    }

    /// Returns true if `attempt` exhausts the budget.
    #[must_use]
    pub fn is_final_attempt(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}
