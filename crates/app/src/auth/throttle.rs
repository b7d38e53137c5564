//! Login throttle.

use jiff::{SignedDuration, Timestamp};

use crate::auth::AuthError;

/// Consecutive failures that trigger a block.
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

/// How long further attempts are refused once blocked.
pub const BLOCK_DURATION: SignedDuration = SignedDuration::from_secs(30);

/// Counts consecutive failed logins and blocks attempts for [`BLOCK_DURATION`] after
/// [`MAX_FAILED_ATTEMPTS`]. Only a successful login resets the count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginThrottle {
    failures: u32,
    blocked_until: Option<Timestamp>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Check whether an attempt may be made at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Blocked`] with the remaining wait while blocked.
    pub fn check(&self, now: Timestamp) -> Result<(), AuthError> {
        match self.blocked_until {
            Some(until) if until > now => {
                let remaining = until.duration_since(now);

                Err(AuthError::Blocked {
                    retry_after_seconds: remaining.as_secs()
                        + i64::from(remaining.subsec_nanos() > 0),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn record_failure(&mut self, now: Timestamp) {
        self.failures = self.failures.saturating_add(1);

        if self.failures >= MAX_FAILED_ATTEMPTS {
            self.blocked_until = Some(now.checked_add(BLOCK_DURATION).unwrap_or(Timestamp::MAX));
        }
    }

    pub fn record_success(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn at(second: i64) -> Result<Timestamp, jiff::Error> {
        Timestamp::from_second(1_750_000_000 + second)
    }

    #[test]
    fn fourth_attempt_within_the_window_is_blocked() -> TestResult {
        let mut throttle = LoginThrottle::new();

        for second in 0..3 {
            throttle.check(at(second)?)?;
            throttle.record_failure(at(second)?);
        }

        assert!(matches!(
            throttle.check(at(10)?),
            Err(AuthError::Blocked {
                retry_after_seconds: 22
            })
        ));

        Ok(())
    }

    #[test]
    fn block_expires_after_thirty_seconds() -> TestResult {
        let mut throttle = LoginThrottle::new();

        for _ in 0..3 {
            throttle.record_failure(at(0)?);
        }

        assert!(throttle.check(at(29)?).is_err());
        assert!(throttle.check(at(30)?).is_ok());

        Ok(())
    }

    #[test]
    fn failure_after_expiry_blocks_again() -> TestResult {
        let mut throttle = LoginThrottle::new();

        for _ in 0..3 {
            throttle.record_failure(at(0)?);
        }

        throttle.record_failure(at(40)?);

        assert!(throttle.check(at(50)?).is_err());
        assert_eq!(throttle.failures(), 4);

        Ok(())
    }

    #[test]
    fn success_resets_the_count() -> TestResult {
        let mut throttle = LoginThrottle::new();

        throttle.record_failure(at(0)?);
        throttle.record_failure(at(1)?);
        throttle.record_success();
        throttle.record_failure(at(2)?);

        assert_eq!(throttle.failures(), 1);
        assert!(throttle.check(at(3)?).is_ok());

        Ok(())
    }
}
