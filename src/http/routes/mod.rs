pub mod auth;
pub mod events;
