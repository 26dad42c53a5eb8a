//! Short-lived opaque bearer tokens served from a fixed-size rotating pool.
//!
//! The [`pool::TokenPool`] owns a ring of token slots. Every [`pool::TokenManager::issue`] call
//! serves the slot under the cursor (regenerating it when its use budget or time-to-live is
//! exhausted) and moves the cursor forward, while [`pool::TokenManager::validate`] accepts any
//! token currently held by one of the slots.

pub mod generator;
pub mod pool;
