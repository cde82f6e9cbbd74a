//! Per-username login throttle.
//!
//! Failed logins increment `login:attempts:{username}`, refreshing its
//! 1 hour window on every failure. The fifth failure converts the counter
//! into a `login:blocked:{username}` marker with a 5 minute TTL and deletes
//! the counter, so the lockout clears itself and a fresh window starts
//! afterwards. Successful logins delete the counter outright.

use std::time::Duration;
use tracing::debug;

use relawan_cache::RedisCache;

use crate::jwt::AuthError;

/// Failures allowed before a lockout.
pub const MAX_ATTEMPTS: i64 = 5;

/// Sliding window for the attempt counter.
pub const ATTEMPT_WINDOW: Duration = Duration::from_secs(3600);

/// Default lockout duration once the threshold is reached.
pub const LOCKOUT: Duration = Duration::from_secs(300);

fn attempts_key(username: &str) -> String {
    format!("login:attempts:{username}")
}

fn blocked_key(username: &str) -> String {
    format!("login:blocked:{username}")
}

/// Attempts remaining after `failures` consecutive failures.
pub fn attempts_left(failures: i64) -> i64 {
    (MAX_ATTEMPTS - failures).max(0)
}

/// Pre-login throttle state for a username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleStatus {
    /// No active lockout; the login may proceed.
    Clear,
    /// Locked out; retry after the given number of seconds.
    Blocked { retry_after_seconds: i64 },
}

/// Outcome of recording one failed login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAttempt {
    /// Below the threshold; this many attempts remain.
    AttemptsLeft(i64),
    /// This failure reached the threshold and started a lockout.
    LockedOut { retry_after_seconds: i64 },
}

/// Login throttle state machine over Redis.
#[derive(Clone, Debug)]
pub struct LoginThrottle {
    cache: RedisCache,
    lockout: Duration,
}

impl LoginThrottle {
    pub fn new(cache: RedisCache) -> Self {
        Self::with_lockout(cache, LOCKOUT)
    }

    /// Overrides the lockout duration. The marker self-clears on its TTL,
    /// so a shorter duration lets tests wait one out.
    pub fn with_lockout(cache: RedisCache, lockout: Duration) -> Self {
        Self { cache, lockout }
    }

    /// Checks for an active lockout. Runs before any credential work.
    pub async fn check(&self, username: &str) -> Result<ThrottleStatus, AuthError> {
        let key = blocked_key(username);

        if self.cache.exists(&key).await? {
            // Marker exists but TTL may race to expiry between the two calls
            let retry_after_seconds = self.cache.ttl(&key).await?.unwrap_or(0);
            return Ok(ThrottleStatus::Blocked {
                retry_after_seconds,
            });
        }

        Ok(ThrottleStatus::Clear)
    }

    /// Records a failed login, starting a lockout at the threshold.
    pub async fn record_failure(&self, username: &str) -> Result<FailedAttempt, AuthError> {
        let key = attempts_key(username);

        let failures = self.cache.incr(&key).await?;
        self.cache.expire(&key, ATTEMPT_WINDOW).await?;

        if failures >= MAX_ATTEMPTS {
            self.cache
                .set_string_with_ttl(&blocked_key(username), "1", self.lockout)
                .await?;
            self.cache.del(&[key]).await?;

            debug!(%username, failures, "Login lockout started");

            return Ok(FailedAttempt::LockedOut {
                retry_after_seconds: self.lockout.as_secs() as i64,
            });
        }

        debug!(%username, failures, "Login failure recorded");

        Ok(FailedAttempt::AttemptsLeft(attempts_left(failures)))
    }

    /// Clears the attempt counter after a successful login.
    pub async fn clear(&self, username: &str) -> Result<(), AuthError> {
        self.cache.del(&[attempts_key(username)]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_left_boundaries() {
        assert_eq!(attempts_left(1), 4);
        assert_eq!(attempts_left(4), 1);
        assert_eq!(attempts_left(5), 0);
        assert_eq!(attempts_left(9), 0);
    }

    #[test]
    fn key_formats() {
        assert_eq!(attempts_key("andi"), "login:attempts:andi");
        assert_eq!(blocked_key("andi"), "login:blocked:andi");
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn fifth_failure_locks_out() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();
        let throttle = LoginThrottle::new(cache.clone());
        let username = "throttle-test";

        cache
            .del(&[attempts_key(username), blocked_key(username)])
            .await
            .unwrap();

        for expected_left in (1..=4).rev() {
            match throttle.record_failure(username).await.unwrap() {
                FailedAttempt::AttemptsLeft(left) => assert_eq!(left, expected_left),
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        match throttle.record_failure(username).await.unwrap() {
            FailedAttempt::LockedOut {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 300),
            other => panic!("unexpected outcome: {other:?}"),
        }

        // counter converted into a lockout marker
        match throttle.check(username).await.unwrap() {
            ThrottleStatus::Blocked {
                retry_after_seconds,
            } => assert!(retry_after_seconds > 0 && retry_after_seconds <= 300),
            ThrottleStatus::Clear => panic!("expected lockout"),
        }

        cache
            .del(&[attempts_key(username), blocked_key(username)])
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn lockout_marker_self_clears() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();
        let throttle = LoginThrottle::with_lockout(cache.clone(), Duration::from_secs(1));
        let username = "lockout-expiry-test";

        cache
            .del(&[attempts_key(username), blocked_key(username)])
            .await
            .unwrap();

        for _ in 0..4 {
            throttle.record_failure(username).await.unwrap();
        }
        assert!(matches!(
            throttle.record_failure(username).await.unwrap(),
            FailedAttempt::LockedOut { .. }
        ));
        assert!(matches!(
            throttle.check(username).await.unwrap(),
            ThrottleStatus::Blocked { .. }
        ));

        // the marker expires on its own, no cleanup required
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(throttle.check(username).await.unwrap(), ThrottleStatus::Clear);
    }
}
