use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum TokenPoolError {
    #[error("Token pool requires at least one slot")]
    ZeroCapacity,
}
