//! Configuration types shared across the orchestrator and stores.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TarifaError;

/// Percentage uplift tiers applied by the repricing advisor.
///
/// Invariants (checked by [`UpliftPolicy::validate`]):
/// - both tiers are non-negative and at most 100%;
/// - `event_today_percent > event_yesterday_percent`;
/// - both tiers carry at most one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpliftPolicy {
    /// Uplift applied when the date itself is an event day.
    pub event_today_percent: Decimal,
    /// Uplift applied on the day after an event.
    pub event_yesterday_percent: Decimal,
}

impl Default for UpliftPolicy {
    fn default() -> Self {
        Self {
            event_today_percent: Decimal::from(20u8),
            event_yesterday_percent: Decimal::from(10u8),
        }
    }
}

impl UpliftPolicy {
    /// Construct a policy without validating it.
    #[must_use]
    pub const fn new(event_today_percent: Decimal, event_yesterday_percent: Decimal) -> Self {
        Self {
            event_today_percent,
            event_yesterday_percent,
        }
    }

    /// Check the tier invariants.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the first violated invariant.
    pub fn validate(&self) -> Result<(), TarifaError> {
        let tiers = [
            ("event_today_percent", self.event_today_percent),
            ("event_yesterday_percent", self.event_yesterday_percent),
        ];
        for (label, pct) in tiers {
            if pct.is_sign_negative() && !pct.is_zero() {
                return Err(TarifaError::InvalidArg(format!(
                    "{label} must be non-negative, got {pct}"
                )));
            }
            if pct > Decimal::ONE_HUNDRED {
                return Err(TarifaError::InvalidArg(format!(
                    "{label} must not exceed 100, got {pct}"
                )));
            }
            if pct.normalize().scale() > 1 {
                return Err(TarifaError::InvalidArg(format!(
                    "{label} must have at most one decimal place, got {pct}"
                )));
            }
        }
        if self.event_today_percent <= self.event_yesterday_percent {
            return Err(TarifaError::InvalidArg(format!(
                "event_today_percent ({}) must be greater than event_yesterday_percent ({})",
                self.event_today_percent, self.event_yesterday_percent
            )));
        }
        Ok(())
    }
}

/// Bounded exponential backoff used when polling a store after a scrape trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Delay before the first re-poll, in milliseconds.
    pub min_backoff_ms: u64,
    /// Ceiling for any single delay, in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor applied after each unsuccessful poll (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
    /// Total number of polls before giving up (>= 1).
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_backoff_ms: 500,
            max_backoff_ms: 8_000,
            factor: 2,
            jitter_percent: 20,
            max_attempts: 6,
        }
    }
}

impl RetryPolicy {
    /// Base delay (before jitter) to wait after the `attempt`-th unsuccessful poll (0-based).
    #[must_use]
    pub fn delay_ms(&self, attempt: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..attempt {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                return self.max_backoff_ms;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Settings for memoizing derived daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of memoized series.
    pub max_entries: u64,
    /// Time-to-live of a memoized series.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl: Duration::from_secs(300),
        }
    }
}

/// Global configuration for the `Tarifa` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TarifaConfig {
    /// Uplift tiers for event proximity.
    pub uplift: UpliftPolicy,
    /// Timeout for individual store reads.
    pub store_timeout: Duration,
    /// Timeout for each price update issued by the applier.
    pub update_timeout: Duration,
    /// Maximum number of concurrent price updates.
    pub apply_concurrency: usize,
    /// Location filter forwarded to the event list.
    pub event_location: Option<String>,
    /// Look-ahead window for upcoming events, in days.
    pub upcoming_horizon_days: u32,
    /// Polling policy used after a scrape trigger.
    pub refresh: RetryPolicy,
    /// Optional memoization of derived series.
    pub memoize: Option<CacheConfig>,
}

impl Default for TarifaConfig {
    fn default() -> Self {
        Self {
            uplift: UpliftPolicy::default(),
            store_timeout: Duration::from_secs(5),
            update_timeout: Duration::from_secs(5),
            apply_concurrency: 8,
            event_location: None,
            upcoming_horizon_days: 30,
            refresh: RetryPolicy::default(),
            memoize: None,
        }
    }
}
