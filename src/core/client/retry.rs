use std::time::Duration;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based).
    pub(crate) fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = factor.powi(attempt.saturating_sub(1) as i32);
                let millis = (base.as_millis() as f64 * exp).min(max.as_millis() as f64);
                Duration::from_millis(millis as u64)
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
///
/// One `RetryConfig` governs a single logical fetch. The attempt counter is
/// never shared across calls, so every chunk of a paginated collection gets
/// the full budget.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism. When disabled, exactly one
    /// attempt is made.
    pub enabled: bool,
    /// The total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff: Backoff::Fixed(Duration::from_secs(1)),
        }
    }
}

impl RetryConfig {
    /// Attempts this config allows (at least one, even when disabled).
    pub(crate) fn attempts(&self) -> u32 {
        if self.enabled { self.max_attempts.max(1) } else { 1 }
    }
}
