use crate::generator::TokenGenerator;
use uuid::Uuid;

/// Generate tokens as hyphenated, random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
