//! What the calendar widget and the sidebar are given to render.

use serde::{Deserialize, Serialize};

use crate::domain::event::{colors_for_label, format_for_widget, parse_timestamp, Event, EventId, EventStatus};

const SIDEBAR_DATE_FORMAT: &str = "%b %-d, %Y";

/// One event in the widget's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub text_color: String,
    #[serde(default)]
    pub extended_props: ExtendedProps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProps {
    #[serde(default)]
    pub description: String,
    /// Raw label; the widget may hand back labels this crate does not know.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub locked: bool,
}

impl From<&Event> for CalendarEvent {
    fn from(event: &Event) -> Self {
        let colors = event.colors();
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start: format_for_widget(event.start, event.all_day),
            end: format_for_widget(event.end, event.all_day),
            all_day: event.all_day,
            background_color: colors.background.to_string(),
            text_color: colors.text.to_string(),
            extended_props: ExtendedProps {
                description: event.description.clone(),
                status: Some(event.status().label().to_string()),
                locked: event.locked(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    pub id: EventId,
    pub title: String,
    pub date: String,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub count: usize,
    pub items: Vec<SidebarEntry>,
}

impl Sidebar {
    pub fn from_visible(events: &[CalendarEvent]) -> Self {
        let items: Vec<SidebarEntry> = events.iter().map(sidebar_entry).collect();
        Self { count: items.len(), items }
    }
}

fn sidebar_entry(event: &CalendarEvent) -> SidebarEntry {
    let label = event.extended_props.status.as_deref().unwrap_or(EventStatus::Pending.label());
    let date = parse_timestamp(&event.start)
        .map(|ts| ts.format(SIDEBAR_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| event.start.clone());
    SidebarEntry {
        id: event.id.clone(),
        title: event.title.clone(),
        date,
        background_color: colors_for_label(label).background.to_string(),
    }
}
