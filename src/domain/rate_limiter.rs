//! Token bucket admission control for the shorten endpoint.
//!
//! The limiter is an owned object (usually behind an `Arc` in
//! [`crate::state::AppState`]), so tests and separate route groups can run
//! independent instances.
//!
//! # Algorithm
//!
//! Every [`TokenBucketLimiter::admit`] call first refills the bucket:
//! `floor(elapsed_seconds * refill_rate)` whole tokens are added, capped at
//! capacity, and the refill timestamp moves to now. The refill runs whether
//! or not the call is admitted. Then one token is taken if any is left.
//! Rejection is immediate; nothing blocks or queues.
//!
//! Refill and check happen under one mutex so concurrent callers cannot both
//! spend the same token.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of monotonic time for the limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward. Clones share the same timeline.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        self.base + offset
    }
}

/// Invalid limiter parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LimiterConfigError {
    #[error("bucket capacity must be at least 1")]
    ZeroCapacity,

    #[error("refill rate must be a finite, non-negative number, got {0}")]
    InvalidRefillRate(f64),
}

/// Static limiter parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitSettings {
    /// Maximum number of tokens held at once.
    pub capacity: u32,
    /// Tokens added per second of elapsed time.
    pub refill_rate: f64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            capacity: 5,
            refill_rate: 1.0,
        }
    }
}

impl RateLimitSettings {
    pub fn validate(&self) -> Result<(), LimiterConfigError> {
        if self.capacity == 0 {
            return Err(LimiterConfigError::ZeroCapacity);
        }
        if !self.refill_rate.is_finite() || self.refill_rate < 0.0 {
            return Err(LimiterConfigError::InvalidRefillRate(self.refill_rate));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct RateBucketState {
    current_tokens: f64,
    last_refill: Instant,
}

/// Process-wide token bucket guarding the shorten operation.
pub struct TokenBucketLimiter {
    settings: RateLimitSettings,
    state: Mutex<RateBucketState>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenBucketLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucketLimiter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl TokenBucketLimiter {
    /// Creates a full bucket driven by the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LimiterConfigError`] if capacity is zero or the refill rate
    /// is negative or not finite.
    pub fn new(settings: RateLimitSettings) -> Result<Self, LimiterConfigError> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Creates a full bucket driven by the given clock.
    pub fn with_clock(
        settings: RateLimitSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LimiterConfigError> {
        settings.validate()?;

        let state = RateBucketState {
            current_tokens: f64::from(settings.capacity),
            last_refill: clock.now(),
        };

        Ok(Self {
            settings,
            state: Mutex::new(state),
            clock,
        })
    }

    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    /// Refills the bucket, then takes one token if available.
    ///
    /// Returns `true` when the call is admitted.
    pub fn admit(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        let elapsed = now.saturating_duration_since(state.last_refill);
        let tokens_to_add = (elapsed.as_secs_f64() * self.settings.refill_rate).floor();
        state.current_tokens =
            (state.current_tokens + tokens_to_add).min(f64::from(self.settings.capacity));
        state.last_refill = now;

        if state.current_tokens > 0.0 {
            state.current_tokens -= 1.0;
            true
        } else {
            false
        }
    }
}
