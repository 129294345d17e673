#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::draft::{Draft, DraftChange, Field};
    use crate::domain::event::{colors_for_label, format_for_widget, parse_timestamp, EventId, EventStatus, TimeRange, TimestampError};
    use crate::domain::ids::{IdGenerator, SequentialIds, UuidIds};
    use crate::domain::validation::{validate, END_BEFORE_START, END_REQUIRED, INVALID_DATE, START_REQUIRED, TITLE_REQUIRED};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn draft(title: &str, start: &str, end: &str) -> Draft {
        let mut draft = Draft::blank(EventId::from("0"), TimeRange::new(at(2024, 1, 1, 9, 0), at(2024, 1, 1, 9, 0)));
        draft.apply(DraftChange::Title(title.into()));
        draft.apply(DraftChange::Start(start.into()));
        draft.apply(DraftChange::End(end.into()));
        draft
    }

    #[test]
    fn colors_follow_status_labels() {
        let pending = colors_for_label("Pending");
        assert_eq!((pending.background, pending.text), ("#5DADE2", "#FFFFFF"));
        for label in ["Done", "Realizada"] {
            let done = colors_for_label(label);
            assert_eq!((done.background, done.text), ("#D3D3D3", "#000000"));
        }
        for label in ["NotDone", "No Realizada"] {
            let not_done = colors_for_label(label);
            assert_eq!((not_done.background, not_done.text), ("#AA0808", "#FFFFFF"));
        }
        for label in ["", "done", "Archived"] {
            let unknown = colors_for_label(label);
            assert_eq!((unknown.background, unknown.text), ("#FFFFFF", "#FFFFFF"));
        }
    }

    #[test]
    fn status_accepts_spanish_labels_on_the_wire() {
        let status: EventStatus = serde_json::from_str("\"No Realizada\"").unwrap();
        assert_eq!(status, EventStatus::NotDone);
        assert_eq!(serde_json::to_string(&EventStatus::Done).unwrap(), "\"Done\"");
        assert!("pending".parse::<EventStatus>().is_err());
    }

    #[test]
    fn timestamps_parse_in_form_and_widget_shapes() {
        assert_eq!(parse_timestamp("2024-01-01T09:15").unwrap(), at(2024, 1, 1, 9, 15));
        assert_eq!(parse_timestamp("2024-01-01T09:15:00").unwrap(), at(2024, 1, 1, 9, 15));
        assert_eq!(parse_timestamp("2024-01-01 09:15").unwrap(), at(2024, 1, 1, 9, 15));
        assert_eq!(parse_timestamp("2024-01-01").unwrap(), at(2024, 1, 1, 0, 0));
        assert_eq!(parse_timestamp("2024-01-01T09:15:00+02:00").unwrap(), at(2024, 1, 1, 9, 15));
        assert_eq!(parse_timestamp("  "), Err(TimestampError::Empty));
        assert!(matches!(parse_timestamp("tomorrow"), Err(TimestampError::Invalid(_))));
    }

    #[test]
    fn widget_format_drops_time_for_all_day() {
        assert_eq!(format_for_widget(at(2024, 1, 1, 9, 0), false), "2024-01-01T09:00:00");
        assert_eq!(format_for_widget(at(2024, 1, 1, 0, 0), true), "2024-01-01");
    }

    #[test]
    fn validation_collects_every_error() {
        let errors = validate(&draft("   ", "", "")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.get(Field::Start), Some(START_REQUIRED));
        assert_eq!(errors.get(Field::End), Some(END_REQUIRED));
    }

    #[test]
    fn validation_rejects_reversed_and_unparsable_ranges() {
        let errors = validate(&draft("Standup", "2024-01-01T10:00", "2024-01-01T09:00")).unwrap_err();
        assert_eq!(errors.get(Field::End), Some(END_BEFORE_START));
        assert!(!errors.contains(Field::Start));

        let errors = validate(&draft("Standup", "2024-01-01T10:00", "not a date")).unwrap_err();
        assert_eq!(errors.get(Field::End), Some(INVALID_DATE));
    }

    #[test]
    fn validation_returns_parsed_range() {
        let range = validate(&draft("Standup", "2024-01-01T09:00", "2024-01-01T09:00")).unwrap();
        assert_eq!(range, TimeRange::new(at(2024, 1, 1, 9, 0), at(2024, 1, 1, 9, 0)));

        let mut all_day = draft("Offsite", "2024-01-01T09:00", "2024-01-02T18:00");
        all_day.apply(DraftChange::AllDay(true));
        let range = validate(&all_day).unwrap();
        assert_eq!(range, TimeRange::new(at(2024, 1, 1, 0, 0), at(2024, 1, 2, 0, 0)));
    }

    #[test]
    fn field_errors_serialize_by_field_name() {
        let errors = validate(&draft("", "2024-01-01T09:00", "2024-01-01T10:00")).unwrap_err();
        assert_eq!(serde_json::to_value(&errors).unwrap(), serde_json::json!({ "title": "title required" }));
    }

    #[test]
    fn sequential_ids_count_up_from_zero() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), EventId::from("0"));
        assert_eq!(ids.next_id(), EventId::from("1"));
        let mut uuids = UuidIds;
        assert_ne!(uuids.next_id(), uuids.next_id());
    }

    #[test]
    fn validation_keeps_timed_events_at_minute_precision() {
        let range = validate(&draft("Standup", "2024-01-01T09:00:59", "2024-01-01T09:15:01+01:00")).unwrap();
        assert_eq!(range, TimeRange::new(at(2024, 1, 1, 9, 0), at(2024, 1, 1, 9, 15)));

        let errors = validate(&draft("Standup", "2024-01-01T09:00:50", "2024-01-01T09:00:10")).err();
        assert_eq!(errors, None);
    }
}
