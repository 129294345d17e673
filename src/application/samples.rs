use crate::domain::{draft::DraftChange, event::EventStatus, repository::EventRepository};

use super::event_store::{EventStore, StoreError};

struct Sample {
    title: &'static str,
    description: &'static str,
    start: &'static str,
    end: &'static str,
    status: EventStatus,
}

const SAMPLES: [Sample; 2] = [
    Sample {
        title: "Team meeting",
        description: "Project kick-off meeting.",
        start: "2023-10-14T09:00",
        end: "2023-10-14T11:30",
        status: EventStatus::Pending,
    },
    Sample {
        title: "Important event",
        description: "Complete",
        start: "2023-10-24T14:00",
        end: "2023-10-24T16:00",
        status: EventStatus::Done,
    },
];

/// Adds the demo events through the regular create path.
pub fn seed<R: EventRepository>(store: &mut EventStore<R>) -> Result<(), StoreError> {
    for sample in &SAMPLES {
        store.begin_create(None);
        store.submit(vec![
            DraftChange::Title(sample.title.to_string()),
            DraftChange::Description(sample.description.to_string()),
            DraftChange::Start(sample.start.to_string()),
            DraftChange::End(sample.end.to_string()),
            DraftChange::Status(sample.status),
        ])?;
    }
    tracing::info!(count = SAMPLES.len(), "seeded sample events");
    Ok(())
}
