//! Authentication-related DTOs

use serde::Serialize;
use std::collections::HashMap;

/// Login payload for `GET /user/get_token`.
///
/// A flat string map: either `{username, password}` for password login, or
/// the field set the Telegram login widget delivers (`id`, `hash`,
/// `auth_date`, `first_name`, ...). Both can be present; the password path is
/// tried per matching account alongside the Telegram credential check.
pub type LoginPayload = HashMap<String, String>;

/// Token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
