//! HTTP handlers

pub mod auth;
pub mod health;
pub mod task;
pub mod user;
