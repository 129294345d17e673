pub mod clock;
pub mod credentials;
pub mod draft;
pub mod event;
pub mod ids;
pub mod repository;
pub mod validation;

mod event_tests;
