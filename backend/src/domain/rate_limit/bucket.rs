//! Token bucket arithmetic for one visitor.
//!
//! Tokens are held in micro-tokens so refill stays in integer arithmetic:
//! at `rate` tokens per second one elapsed microsecond adds `rate`
//! micro-tokens.

use chrono::{DateTime, Utc};

const MICROS_PER_TOKEN: u64 = 1_000_000;

/// Bucket state: remaining capacity and the instant it was last refilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TokenBucket {
    micro_tokens: u64,
    last_refill: DateTime<Utc>,
}

impl TokenBucket {
    /// A bucket holding `burst` tokens.
    pub(super) fn full(burst: u32, now: DateTime<Utc>) -> Self {
        Self {
            micro_tokens: capacity(burst),
            last_refill: now,
        }
    }

    /// Refill by the time elapsed since the last call, then spend one token
    /// if a whole token is available.
    pub(super) fn try_take(&mut self, now: DateTime<Utc>, rate: u32, burst: u32) -> bool {
        if now > self.last_refill {
            let elapsed = (now - self.last_refill)
                .num_microseconds()
                .and_then(|micros| u64::try_from(micros).ok())
                .unwrap_or(u64::MAX);
            let added = elapsed.saturating_mul(u64::from(rate));
            self.micro_tokens = self.micro_tokens.saturating_add(added).min(capacity(burst));
            self.last_refill = now;
        }

        if self.micro_tokens >= MICROS_PER_TOKEN {
            self.micro_tokens -= MICROS_PER_TOKEN;
            true
        } else {
            false
        }
    }

    /// Whole tokens currently available.
    #[cfg(test)]
    pub(super) fn tokens(&self) -> u64 {
        self.micro_tokens / MICROS_PER_TOKEN
    }
}

fn capacity(burst: u32) -> u64 {
    u64::from(burst).saturating_mul(MICROS_PER_TOKEN)
}
