//! Calendar events, their status and the colours the calendar paints them with.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minute precision, as shown in the edit dialog.
pub const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Second precision, as handed to the calendar widget for timed events.
pub const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Date only, for all-day events.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 4] = [
    SECOND_FORMAT,
    MINUTE_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self { Self(value.to_string()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    #[serde(alias = "Pendiente")]
    Pending,
    #[serde(alias = "Realizada")]
    Done,
    #[serde(alias = "No Realizada")]
    NotDone,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Pending => "Pending",
            EventStatus::Done => "Done",
            EventStatus::NotDone => "NotDone",
        }
    }

    pub fn colors(self) -> EventColors {
        match self {
            EventStatus::Pending => PENDING_COLORS,
            EventStatus::Done => DONE_COLORS,
            EventStatus::NotDone => NOT_DONE_COLORS,
        }
    }

    /// Next status in dialog order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            EventStatus::Pending => EventStatus::Done,
            EventStatus::Done => EventStatus::NotDone,
            EventStatus::NotDone => EventStatus::Pending,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EventStatus {
    type Err = UnknownStatus;

    /// Accepts both the English labels and the Spanish ones older clients send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "Pendiente" => Ok(EventStatus::Pending),
            "Done" | "Realizada" => Ok(EventStatus::Done),
            "NotDone" | "No Realizada" => Ok(EventStatus::NotDone),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventColors {
    pub background: &'static str,
    pub text: &'static str,
}

pub const PENDING_COLORS: EventColors = EventColors { background: "#5DADE2", text: "#FFFFFF" };
pub const DONE_COLORS: EventColors = EventColors { background: "#D3D3D3", text: "#000000" };
pub const NOT_DONE_COLORS: EventColors = EventColors { background: "#AA0808", text: "#FFFFFF" };
pub const UNKNOWN_COLORS: EventColors = EventColors { background: "#FFFFFF", text: "#FFFFFF" };

/// Colours for a raw status label. Labels that name no status paint white on white.
pub fn colors_for_label(label: &str) -> EventColors {
    label.parse::<EventStatus>().map(EventStatus::colors).unwrap_or(UNKNOWN_COLORS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self { Self { start, end } }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("invalid date: {0}")]
    Invalid(String),
}

/// Parses a wall-clock timestamp as typed into the dialog or sent by the widget.
///
/// RFC 3339 input keeps its local wall-clock part; the offset is dropped.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TimestampError::Empty);
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.naive_local())
        .map_err(|_| TimestampError::Invalid(raw.to_string()))
}

pub fn format_minutes(ts: NaiveDateTime) -> String { ts.format(MINUTE_FORMAT).to_string() }

/// Widget representation: date only when all-day, seconds otherwise.
pub fn format_for_widget(ts: NaiveDateTime, all_day: bool) -> String {
    if all_day { ts.format(DATE_FORMAT).to_string() } else { ts.format(SECOND_FORMAT).to_string() }
}

/// A committed calendar event.
///
/// `locked` and the colours are derived from `status` and only change through
/// [`Event::set_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    status: EventStatus,
    locked: bool,
    colors: EventColors,
}

impl Event {
    pub fn new(id: EventId, title: String, description: String, range: TimeRange, all_day: bool, status: EventStatus) -> Self {
        Self {
            id,
            title,
            description,
            start: range.start,
            end: range.end,
            all_day,
            status,
            locked: status == EventStatus::Done,
            colors: status.colors(),
        }
    }

    pub fn status(&self) -> EventStatus { self.status }

    pub fn locked(&self) -> bool { self.locked }

    pub fn colors(&self) -> EventColors { self.colors }

    pub fn set_status(&mut self, status: EventStatus) {
        self.status = status;
        self.locked = status == EventStatus::Done;
        self.colors = status.colors();
    }
}
