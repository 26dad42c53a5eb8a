mod token_manager;
pub use self::token_manager::*;
mod token_slot;
pub use self::token_slot::*;
mod token_pool_config;
pub use self::token_pool_config::*;
mod token_pool_error;
pub use self::token_pool_error::*;
mod token_pool;
pub use self::token_pool::*;
