//! Axum integration of the token pool: a middleware admitting only requests that carry a valid
//! token in a header, and a route publishing freshly issued tokens.

mod problem;
pub use self::problem::*;
mod token_guard;
pub use self::token_guard::*;
mod token_publisher;
pub use self::token_publisher::*;
