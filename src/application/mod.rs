pub mod auth_service;
pub mod event_store;
pub mod notifier;
pub mod projection;
pub mod samples;
