use uuid::Uuid;

use super::event::EventId;

/// Source of fresh event ids, injected into the store.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> EventId;
}

/// Monotonic counter rendered as decimal text, starting at 0 by default.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds { next: u64 }

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> EventId {
        let id = EventId(self.next.to_string());
        self.next += 1;
        id
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> EventId { EventId(Uuid::new_v4().to_string()) }
}
