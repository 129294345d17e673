//! Event lifecycle: drafts, validation, the status lock, and deletion.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    clock::Clock,
    draft::{Draft, DraftChange, DraftMode},
    event::{Event, EventId, EventStatus, TimeRange},
    ids::IdGenerator,
    repository::{EventRepository, RepositoryError},
    validation::{self, FieldErrors},
};

use super::notifier::Notification;
use super::projection::{CalendarEvent, Sidebar};

pub const LOCKED_MESSAGE: &str = "cannot modify a completed event";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no event is open for editing")]
    NoDraft,
    #[error("event not found: {0}")]
    NotFound(EventId),
    #[error("cannot modify a completed event")]
    LockedEvent,
    #[error("validation failed on {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl StoreError {
    /// The blocking message shown for errors that are not per-field.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            StoreError::Validation(_) => None,
            StoreError::LockedEvent => Some(Notification::error(LOCKED_MESSAGE)),
            other => Some(Notification::error(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(EventId),
    Updated(EventId),
}

impl SaveOutcome {
    pub fn id(&self) -> &EventId {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SaveOutcome::Created(_) => "created",
            SaveOutcome::Updated(_) => "updated",
        }
    }
}

/// Owns the committed events and the single open draft.
///
/// Every operation runs to completion; callers sharing a store across threads
/// wrap it in a mutex.
pub struct EventStore<R: EventRepository> {
    repo: R,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    draft: Option<Draft>,
    selection: Option<EventId>,
    field_errors: FieldErrors,
    visible: Option<Vec<CalendarEvent>>,
}

impl<R: EventRepository> EventStore<R> {
    pub fn new(repo: R, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Self { repo, ids, clock, draft: None, selection: None, field_errors: FieldErrors::default(), visible: None }
    }

    /// Opens a blank draft under a fresh id, over `range` or the current time.
    pub fn begin_create(&mut self, range: Option<TimeRange>) -> &Draft {
        let range = range.unwrap_or_else(|| {
            let now = self.clock.now();
            TimeRange::new(now, now)
        });
        let id = self.ids.next_id();
        debug!(%id, start = %range.start, end = %range.end, "begin create");
        self.selection = None;
        self.field_errors.clear();
        self.draft.insert(Draft::blank(id, range))
    }

    /// Opens a copy of a committed event.
    pub fn begin_edit(&mut self, id: &EventId) -> Result<&Draft, StoreError> {
        let event = self.repo.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let draft = Draft::from_event(event);
        debug!(%id, locked = draft.locked(), "begin edit");
        self.selection = Some(id.clone());
        self.field_errors.clear();
        Ok(self.draft.insert(draft))
    }

    pub fn update_draft_field(&mut self, change: DraftChange) -> Result<(), StoreError> {
        let draft = self.draft.as_mut().ok_or(StoreError::NoDraft)?;
        if draft.locked() {
            warn!(id = %draft.id, field = change.field().name(), "refused edit of a completed event");
            return Err(StoreError::LockedEvent);
        }
        debug!(id = %draft.id, field = change.field().name(), "draft field updated");
        draft.apply(change);
        Ok(())
    }

    /// Applies the submitted form fields and saves.
    ///
    /// A locked draft only accepts a submit that changes nothing.
    pub fn submit(&mut self, changes: Vec<DraftChange>) -> Result<SaveOutcome, StoreError> {
        let draft = self.draft.as_mut().ok_or(StoreError::NoDraft)?;
        if draft.locked() {
            if let Some(change) = changes.iter().find(|c| draft.would_change(c)) {
                warn!(id = %draft.id, field = change.field().name(), "refused submit of a completed event");
                return Err(StoreError::LockedEvent);
            }
        } else {
            for change in changes {
                draft.apply(change);
            }
        }
        self.save()
    }

    pub fn save(&mut self) -> Result<SaveOutcome, StoreError> {
        let draft = self.draft.as_ref().ok_or(StoreError::NoDraft)?;
        if draft.locked() && draft.status != EventStatus::Done {
            warn!(id = %draft.id, status = %draft.status, "refused reopening a completed event");
            return Err(StoreError::LockedEvent);
        }
        let range = match validation::validate(draft) {
            Ok(range) => range,
            Err(errors) => {
                warn!(id = %draft.id, fields = %errors, "validation failed");
                self.field_errors = errors.clone();
                return Err(StoreError::Validation(errors));
            }
        };

        let outcome = match &self.selection {
            Some(id) => {
                let event = self.repo.get_mut(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
                event.title = draft.title.clone();
                event.description = draft.description.clone();
                event.start = range.start;
                event.end = range.end;
                event.all_day = draft.all_day;
                event.set_status(draft.status);
                info!(%id, status = %event.status(), locked = event.locked(), "event updated");
                SaveOutcome::Updated(id.clone())
            }
            None => {
                let event = Event::new(
                    draft.id.clone(),
                    draft.title.clone(),
                    draft.description.clone(),
                    range,
                    draft.all_day,
                    draft.status,
                );
                info!(id = %event.id, status = %event.status(), locked = event.locked(), "event created");
                let id = event.id.clone();
                self.repo.insert(event)?;
                SaveOutcome::Created(id)
            }
        };
        self.visible = None;
        self.close_surface();
        Ok(outcome)
    }

    /// Removes the selected event, locked or not. Without a selection this only
    /// closes the draft.
    pub fn delete(&mut self) -> Option<Event> {
        let removed = self.selection.take().and_then(|id| self.repo.remove(&id));
        match &removed {
            Some(event) => {
                info!(id = %event.id, locked = event.locked(), "event deleted");
                self.visible = None;
            }
            None => debug!("delete without a committed selection"),
        }
        self.close_surface();
        removed
    }

    pub fn cancel(&mut self) {
        debug!("draft cancelled");
        self.close_surface();
    }

    /// Records what the calendar widget currently shows. Never touches the
    /// committed collection, and is dropped whenever that collection changes.
    pub fn on_calendar_sync(&mut self, visible: Vec<CalendarEvent>) {
        debug!(count = visible.len(), "calendar sync");
        self.visible = Some(visible);
    }

    pub fn events(&self) -> Vec<Event> { self.repo.list() }

    pub fn event(&self, id: &EventId) -> Option<&Event> { self.repo.get(id) }

    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        self.repo.list().iter().map(CalendarEvent::from).collect()
    }

    /// Sidebar over the last synced widget list, or the committed events when
    /// nothing was synced since the collection last changed.
    pub fn sidebar(&self) -> Sidebar {
        match &self.visible {
            Some(visible) => Sidebar::from_visible(visible),
            None => Sidebar::from_visible(&self.calendar_events()),
        }
    }

    pub fn draft(&self) -> Option<&Draft> { self.draft.as_ref() }

    pub fn mode(&self) -> Option<DraftMode> {
        self.draft.as_ref().map(|_| if self.selection.is_some() { DraftMode::Edit } else { DraftMode::Create })
    }

    pub fn field_errors(&self) -> &FieldErrors { &self.field_errors }

    pub fn is_locked(&self) -> bool { self.draft.as_ref().is_some_and(Draft::locked) }

    pub fn is_editing(&self) -> bool { self.draft.is_some() }

    fn close_surface(&mut self) {
        self.draft = None;
        self.selection = None;
        self.field_errors.clear();
    }
}
