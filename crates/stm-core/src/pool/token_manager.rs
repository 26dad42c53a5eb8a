use std::sync::Arc;

/// Issue tokens and check their validity.
pub trait TokenManager: Send + Sync {
    /// Return a token that is currently valid for the slot under the cursor.
    fn issue(&self) -> String;

    /// Check if the token is held by the pool, counting the check as a use on success.
    fn validate(&self, token: &str) -> bool;
}

impl<T> TokenManager for Arc<T>
where
    T: TokenManager + ?Sized,
{
    fn issue(&self) -> String {
        (**self).issue()
    }

    fn validate(&self, token: &str) -> bool {
        (**self).validate(token)
    }
}
