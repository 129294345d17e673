use thiserror::Error;

use super::event::{Event, EventId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("event id already in use: {0}")]
    DuplicateId(EventId),
}

/// The committed event collection. Listing keeps insertion order.
pub trait EventRepository: Send + 'static {
    fn insert(&mut self, event: Event) -> Result<(), RepositoryError>;
    fn get(&self, id: &EventId) -> Option<&Event>;
    fn get_mut(&mut self, id: &EventId) -> Option<&mut Event>;
    fn remove(&mut self, id: &EventId) -> Option<Event>;
    fn list(&self) -> Vec<Event>;
}
