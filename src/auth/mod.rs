//! Authentication module
//! Password hashing, session tokens, Telegram login verification

pub mod middleware;
pub mod password;
pub mod telegram;
pub mod token;

pub use middleware::{auth_middleware, extract_token, CurrentUser};
pub use password::PasswordHasher;
pub use telegram::TelegramVerifier;
pub use token::{Claims, TokenService};
