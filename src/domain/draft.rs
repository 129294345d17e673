//! The working copy behind the edit dialog.

use serde::Serialize;

use super::event::{format_minutes, Event, EventId, EventStatus, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field { Title, Description, Start, End, AllDay, Status }

impl Field {
    pub const ALL: [Field; 6] = [Field::Title, Field::Description, Field::Start, Field::End, Field::AllDay, Field::Status];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Start => "start",
            Field::End => "end",
            Field::AllDay => "allDay",
            Field::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    Title(String),
    Description(String),
    Start(String),
    End(String),
    AllDay(bool),
    Status(EventStatus),
}

impl DraftChange {
    pub fn field(&self) -> Field {
        match self {
            DraftChange::Title(_) => Field::Title,
            DraftChange::Description(_) => Field::Description,
            DraftChange::Start(_) => Field::Start,
            DraftChange::End(_) => Field::End,
            DraftChange::AllDay(_) => Field::AllDay,
            DraftChange::Status(_) => Field::Status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftMode { Create, Edit }

/// Field values being edited, decoupled from the committed event until save.
///
/// `locked` reflects the event as it was loaded and does not follow later
/// status edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub status: EventStatus,
    locked: bool,
}

impl Draft {
    pub(crate) fn blank(id: EventId, range: TimeRange) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            start: format_minutes(range.start),
            end: format_minutes(range.end),
            all_day: false,
            status: EventStatus::Pending,
            locked: false,
        }
    }

    pub(crate) fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start: format_minutes(event.start),
            end: format_minutes(event.end),
            all_day: event.all_day,
            status: event.status(),
            locked: event.locked(),
        }
    }

    pub fn locked(&self) -> bool { self.locked }

    pub(crate) fn apply(&mut self, change: DraftChange) {
        match change {
            DraftChange::Title(v) => self.title = v,
            DraftChange::Description(v) => self.description = v,
            DraftChange::Start(v) => self.start = v,
            DraftChange::End(v) => self.end = v,
            DraftChange::AllDay(v) => self.all_day = v,
            DraftChange::Status(v) => self.status = v,
        }
    }

    /// Whether applying `change` would leave the draft different.
    pub fn would_change(&self, change: &DraftChange) -> bool {
        match change {
            DraftChange::Title(v) => &self.title != v,
            DraftChange::Description(v) => &self.description != v,
            DraftChange::Start(v) => &self.start != v,
            DraftChange::End(v) => &self.end != v,
            DraftChange::AllDay(v) => self.all_day != *v,
            DraftChange::Status(v) => self.status != *v,
        }
    }

    /// Text shown for a field in a form.
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Title => self.title.clone(),
            Field::Description => self.description.clone(),
            Field::Start => self.start.clone(),
            Field::End => self.end.clone(),
            Field::AllDay => if self.all_day { "yes".to_string() } else { "no".to_string() },
            Field::Status => self.status.label().to_string(),
        }
    }
}
