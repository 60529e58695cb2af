//! Backoff strategies and jitter.

use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Maps the current retry delay to the next one.
#[derive(Clone, Default)]
pub enum Backoff {
    /// delay stays the same
    Constant,
    /// delay + increment
    Linear(Duration),
    /// delay * 2
    #[default]
    Exponential,
    /// Caller-supplied strategy.
    Custom(Arc<dyn Fn(Duration) -> Duration + Send + Sync>),
}

impl Backoff {
    /// Creates a custom strategy.
    pub fn custom<F>(strategy: F) -> Self
    where
        F: Fn(Duration) -> Duration + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(strategy))
    }

    /// Returns the delay to use after `delay`.
    #[must_use]
    pub fn next_delay(&self, delay: Duration) -> Duration {
        match self {
            Self::Constant => delay,
            Self::Linear(increment) => delay.saturating_add(*increment),
            Self::Exponential => delay.saturating_mul(2),
            Self::Custom(strategy) => strategy(delay),
        }
    }
}

impl fmt::Debug for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => f.write_str("Constant"),
            Self::Linear(increment) => f.debug_tuple("Linear").field(increment).finish(),
            Self::Exponential => f.write_str("Exponential"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Draws a delay uniformly from `[delay - jitter, delay + jitter]`.
///
/// The lower bound is clamped at zero, so the result is never negative.
#[must_use]
pub fn jittered_delay(delay: Duration, jitter: Duration) -> Duration {
    if jitter.is_zero() {
        return delay;
    }

    let low = delay.saturating_sub(jitter);
    let high = delay.saturating_add(jitter);
    rand::thread_rng().gen_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_default() {
        assert!(matches!(Backoff::default(), Backoff::Exponential));
    }

    #[test]
    fn test_constant_backoff() {
        let backoff = Backoff::Constant;
        assert_eq!(backoff.next_delay(Duration::from_millis(100)), Duration::from_millis(100));
    }

    #[test]
    fn test_linear_backoff() {
        let backoff = Backoff::Linear(Duration::from_millis(50));
        let mut delay = Duration::from_millis(100);
        delay = backoff.next_delay(delay);
        assert_eq!(delay, Duration::from_millis(150));
        delay = backoff.next_delay(delay);
        assert_eq!(delay, Duration::from_millis(200));
    }

    #[test]
    fn test_exponential_backoff() {
        let backoff = Backoff::Exponential;
        let mut delay = Duration::from_millis(100);
        for expected in [200, 400, 800] {
            delay = backoff.next_delay(delay);
            assert_eq!(delay, Duration::from_millis(expected));
        }
    }

    #[test]
    fn test_exponential_backoff_saturates() {
        let backoff = Backoff::Exponential;
        assert_eq!(backoff.next_delay(Duration::MAX), Duration::MAX);
    }

    #[test]
    fn test_custom_backoff() {
        let backoff = Backoff::custom(|delay| delay * 3);
        assert_eq!(backoff.next_delay(Duration::from_millis(10)), Duration::from_millis(30));
        assert_eq!(format!("{backoff:?}"), "Custom(..)");
    }

    #[test]
    fn test_no_jitter() {
        let delay = Duration::from_millis(500);
        assert_eq!(jittered_delay(delay, Duration::ZERO), delay);
    }

    #[test]
    fn test_jitter_bounds() {
        let delay = Duration::from_millis(500);
        let jitter = Duration::from_millis(200);

        for _ in 0..1000 {
            let sampled = jittered_delay(delay, jitter);
            assert!(sampled >= Duration::from_millis(300));
            assert!(sampled <= Duration::from_millis(700));
        }
    }

    #[test]
    fn test_jitter_never_negative() {
        let delay = Duration::from_millis(10);
        let jitter = Duration::from_millis(50);

        for _ in 0..1000 {
            let sampled = jittered_delay(delay, jitter);
            assert!(sampled <= Duration::from_millis(60));
        }
        assert_eq!(jittered_delay(Duration::ZERO, Duration::ZERO), Duration::ZERO);
    }
}
