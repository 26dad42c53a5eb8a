use crate::{
    generator::{TokenGenerator, UuidTokenGenerator},
    pool::{TokenManager, TokenPoolConfig, TokenPoolError, TokenSlot, ValidationMode},
};
use std::{
    fmt,
    num::NonZeroU32,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

struct Ring {
    slots: Vec<TokenSlot>,
    cursor: usize,
}

/// A point-in-time copy of the ring.
#[derive(Debug, Clone)]
pub struct TokenPoolSnapshot {
    pub cursor: usize,
    pub slots: Vec<TokenSlot>,
}

/// A ring buffer of tokens.
///
/// Each `issue` serves the slot under the cursor and moves the cursor to the next slot, hence at most
/// `capacity` distinct tokens are valid at the same time. A slot is regenerated when `issue` finds it
/// past its use budget or time-to-live.
///
/// Examples:
/// - `TokenPool::new(1, 0, Duration::ZERO)`: one token with unlimited uses that never expires.
/// - `TokenPool::new(3, 0, 8 * HOUR)`: three tokens with unlimited uses each for up to 8 hours.
/// - `TokenPool::new(5, 100, 3 * HOUR)`: five tokens with 100 uses each for up to 3 hours.
pub struct TokenPool {
    ring: Mutex<Ring>,
    capacity: usize,
    max_uses: Option<NonZeroU32>,
    ttl: Option<Duration>,
    validation: ValidationMode,
    generator: Box<dyn TokenGenerator>,
}

impl TokenPool {
    /// Create a pool of UUID tokens.
    /// A `max_uses` of 0 allows unlimited uses, a zero `ttl` disables the time based expiry.
    pub fn new(capacity: usize, max_uses: u32, ttl: Duration) -> Result<Self, TokenPoolError> {
        Self::with_generator(capacity, max_uses, ttl, UuidTokenGenerator)
    }

    pub fn with_generator<G>(capacity: usize, max_uses: u32, ttl: Duration, generator: G) -> Result<Self, TokenPoolError>
    where
        G: TokenGenerator + 'static,
    {
        if capacity == 0 {
            return Err(TokenPoolError::ZeroCapacity);
        }

        let max_uses = NonZeroU32::new(max_uses);
        let ttl = (!ttl.is_zero()).then_some(ttl);

        let now = Instant::now();
        let slots = (0..capacity)
            .map(|_| TokenSlot::new(generator.generate(), ttl, now))
            .collect();

        log::debug!("Token pool created with {capacity} slot(s), max uses: {max_uses:?}, ttl: {ttl:?}");

        Ok(Self {
            ring: Mutex::new(Ring { slots, cursor: 0 }),
            capacity,
            max_uses,
            ttl,
            validation: ValidationMode::default(),
            generator: Box::new(generator),
        })
    }

    pub fn from_config(config: &TokenPoolConfig) -> Result<Self, TokenPoolError> {
        Ok(Self::new(config.capacity, config.max_uses, config.ttl())?.with_validation(config.validation))
    }

    #[must_use]
    pub fn with_validation(self, validation: ValidationMode) -> Self {
        Self { validation, ..self }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_uses(&self) -> Option<NonZeroU32> {
        self.max_uses
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn snapshot(&self) -> TokenPoolSnapshot {
        let ring = self.lock();
        TokenPoolSnapshot {
            cursor: ring.cursor,
            slots: ring.slots.clone(),
        }
    }

    // Every step under the lock leaves the ring consistent, so a panic in another caller
    // cannot leave it half updated.
    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenManager for TokenPool {
    fn issue(&self) -> String {
        let mut ring = self.lock();
        let now = Instant::now();

        let index = ring.cursor;
        let slot = &mut ring.slots[index];
        slot.record_use();
        if slot.is_stale(self.max_uses, now) {
            log::trace!("Regenerating token slot {index}");
            slot.regenerate(self.generator.generate(), self.ttl, now);
        }
        let value = slot.value().to_owned();

        ring.cursor = (index + 1) % self.capacity;
        value
    }

    fn validate(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }

        let mut ring = self.lock();
        let Some((index, slot)) = ring.slots.iter_mut().enumerate().find(|(_, slot)| slot.value() == token) else {
            log::trace!("Token is not in the pool");
            return false;
        };

        if self.validation == ValidationMode::Strict && !slot.accepts_use(self.max_uses, Instant::now()) {
            log::trace!("Token slot {index} has no uses left");
            return false;
        }

        slot.record_use();
        true
    }
}

impl fmt::Debug for TokenPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPool")
            .field("capacity", &self.capacity)
            .field("max_uses", &self.max_uses)
            .field("ttl", &self.ttl)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}
