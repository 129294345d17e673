use crate::domain::{
    event::{Event, EventId},
    repository::{EventRepository, RepositoryError},
};

/// Memory-resident event collection; contents are lost with the process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Vec<Event>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self { Self::default() }

    fn position(&self, id: &EventId) -> Option<usize> { self.events.iter().position(|e| &e.id == id) }
}

impl EventRepository for InMemoryEventRepository {
    fn insert(&mut self, event: Event) -> Result<(), RepositoryError> {
        if self.position(&event.id).is_some() {
            return Err(RepositoryError::DuplicateId(event.id));
        }
        self.events.push(event);
        Ok(())
    }

    fn get(&self, id: &EventId) -> Option<&Event> { self.events.iter().find(|e| &e.id == id) }

    fn get_mut(&mut self, id: &EventId) -> Option<&mut Event> { self.events.iter_mut().find(|e| &e.id == id) }

    fn remove(&mut self, id: &EventId) -> Option<Event> {
        let index = self.position(id)?;
        Some(self.events.remove(index))
    }

    fn list(&self) -> Vec<Event> { self.events.clone() }
}
