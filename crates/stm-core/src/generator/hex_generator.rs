use crate::generator::TokenGenerator;
use ring::rand::{SecureRandom, SystemRandom};

const TOKEN_BYTES: usize = 16;

/// Generate tokens as 16 random bytes in hex form (32 characters).
#[derive(Debug)]
pub struct HexTokenGenerator {
    random: SystemRandom,
}

impl HexTokenGenerator {
    pub fn new() -> Self {
        Self { random: SystemRandom::new() }
    }
}

impl Default for HexTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenGenerator for HexTokenGenerator {
    fn generate(&self) -> String {
        let mut raw = [0u8; TOKEN_BYTES];
        // the OS entropy source is not expected to fail, there is no way to mint a token without it
        self.random.fill(&mut raw).expect("system random source is unavailable");
        hex::encode(raw)
    }
}
