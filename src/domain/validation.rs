//! Save-time validation of a draft.
//!
//! All applicable errors are collected; nothing short-circuits.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use super::draft::{Draft, Field};
use super::event::{parse_timestamp, TimeRange, TimestampError};

pub const TITLE_REQUIRED: &str = "title required";
pub const START_REQUIRED: &str = "start required";
pub const END_REQUIRED: &str = "end required";
pub const END_BEFORE_START: &str = "end before start";
pub const INVALID_DATE: &str = "invalid date";

/// Field name to error message, for per-field highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: &str) { self.0.insert(field, message.to_string()); }

    pub fn get(&self, field: Field) -> Option<&str> { self.0.get(&field).map(String::as_str) }

    pub fn contains(&self, field: Field) -> bool { self.0.contains_key(&field) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn clear(&mut self) { self.0.clear(); }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.keys().map(|field| field.name()).collect();
        f.write_str(&names.join(", "))
    }
}

/// Validates `draft` and returns its parsed time range.
pub fn validate(draft: &Draft) -> Result<TimeRange, FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.title.trim().is_empty() {
        errors.insert(Field::Title, TITLE_REQUIRED);
    }
    let start = check_timestamp(&draft.start, draft.all_day, Field::Start, START_REQUIRED, &mut errors);
    let end = check_timestamp(&draft.end, draft.all_day, Field::End, END_REQUIRED, &mut errors);

    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.insert(Field::End, END_BEFORE_START);
        }
        if errors.is_empty() {
            return Ok(TimeRange::new(start, end));
        }
    }
    Err(errors)
}

fn check_timestamp(raw: &str, all_day: bool, field: Field, required: &str, errors: &mut FieldErrors) -> Option<NaiveDateTime> {
    match parse_timestamp(raw) {
        Ok(ts) if all_day => Some(ts.date().and_time(NaiveTime::MIN)),
        Ok(ts) => Some(whole_minutes(ts)),
        Err(TimestampError::Empty) => {
            errors.insert(field, required);
            None
        }
        Err(TimestampError::Invalid(_)) => {
            errors.insert(field, INVALID_DATE);
            None
        }
    }
}

/// Timed events carry minute precision, the same precision the dialog shows.
fn whole_minutes(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0).and_then(|ts| ts.with_nanosecond(0)).unwrap_or(ts)
}
