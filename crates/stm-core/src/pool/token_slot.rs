use std::{
    num::NonZeroU32,
    time::{Duration, Instant},
};

/// A ttl too large to be represented as an instant never expires.
fn expiry(ttl: Option<Duration>, now: Instant) -> Option<Instant> {
    ttl.and_then(|ttl| now.checked_add(ttl))
}

/// One position of the ring: a token value together with its usage and expiry.
#[derive(Debug, Clone)]
pub struct TokenSlot {
    value: String,
    use_count: u64,
    expires_at: Option<Instant>,
}

impl TokenSlot {
    pub(crate) fn new(value: String, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value,
            use_count: 0,
            expires_at: expiry(ttl, now),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of acceptances since the value was last (re)generated.
    pub fn use_count(&self) -> u64 {
        self.use_count
    }

    /// The instant after which the slot is stale, `None` if it never expires by time.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    pub fn is_exhausted(&self, max_uses: Option<NonZeroU32>) -> bool {
        max_uses.is_some_and(|max_uses| self.use_count > u64::from(max_uses.get()))
    }

    /// Check if one more use would still be within the limits, the rule `issue` applies after counting the use.
    pub fn accepts_use(&self, max_uses: Option<NonZeroU32>, now: Instant) -> bool {
        !self.is_expired(now) && max_uses.map_or(true, |max_uses| self.use_count < u64::from(max_uses.get()))
    }

    /// A stale slot has to be regenerated before its value can be served again.
    pub fn is_stale(&self, max_uses: Option<NonZeroU32>, now: Instant) -> bool {
        self.is_expired(now) || self.is_exhausted(max_uses)
    }

    pub(crate) fn record_use(&mut self) {
        self.use_count = self.use_count.saturating_add(1);
    }

    /// Replace the value and restart the limits, the caller receiving the new value counts as the first use.
    pub(crate) fn regenerate(&mut self, value: String, ttl: Option<Duration>, now: Instant) {
        self.value = value;
        self.use_count = 1;
        self.expires_at = expiry(ttl, now);
    }
}
