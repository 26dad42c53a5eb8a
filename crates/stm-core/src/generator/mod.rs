mod token_generator;
pub use self::token_generator::*;
mod uuid_generator;
pub use self::uuid_generator::*;
mod hex_generator;
pub use self::hex_generator::*;
