//! Domain models and request/response DTOs

pub mod auth;
pub mod task;
pub mod user;

pub use auth::*;
pub use task::*;
pub use user::*;
