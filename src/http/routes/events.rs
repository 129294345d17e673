use std::sync::{Arc, Mutex, MutexGuard};

use axum::{extract::{Path, State}, routing::{get, post}, Json, Router};
use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::{
    application::{event_store::{EventStore, StoreError}, notifier::Notifier, projection::CalendarEvent},
    domain::{event::EventId, repository::EventRepository},
    http::types::{ApiError, DraftPatch, RangeBody},
};

pub struct AppState<R: EventRepository> {
    pub store: Arc<Mutex<EventStore<R>>>,
    pub notifier: Arc<dyn Notifier>,
}

impl<R: EventRepository> Clone for AppState<R> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store), notifier: Arc::clone(&self.notifier) } }
}

impl<R: EventRepository> AppState<R> {
    pub fn new(store: EventStore<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store: Arc::new(Mutex::new(store)), notifier }
    }

    /// Sends the blocking message of a refused operation down the notification channel.
    fn refuse(&self, err: StoreError) -> ApiError {
        if let Some(notification) = err.notification() {
            self.notifier.notify(&notification);
        }
        err.into()
    }

    fn lock(&self) -> Result<MutexGuard<'_, EventStore<R>>, ApiError> {
        self.store.lock().map_err(|_| ApiError::internal("event store unavailable"))
    }
}

pub fn router<R: EventRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/events", get(list_events::<R>))
        .route("/events/sync", post(sync_events::<R>))
        .route("/sidebar", get(sidebar::<R>))
        .route("/draft", get(get_draft::<R>).patch(patch_draft::<R>))
        .route("/draft/new", post(new_draft::<R>))
        .route("/draft/edit/:id", post(edit_draft::<R>))
        .route("/draft/save", post(save_draft::<R>))
        .route("/draft/cancel", post(cancel_draft::<R>))
        .route("/draft/delete", post(delete_draft::<R>))
        .with_state(state)
}

async fn list_events<R: EventRepository>(State(state): State<AppState<R>>) -> Result<Json<Value>, ApiError> {
    let store = state.lock()?;
    Ok(Json(json!({ "items": store.calendar_events() })))
}

async fn sync_events<R: EventRepository>(State(state): State<AppState<R>>, Json(visible): Json<Vec<CalendarEvent>>) -> Result<Json<Value>, ApiError> {
    let mut store = state.lock()?;
    let count = visible.len();
    store.on_calendar_sync(visible);
    Ok(Json(json!({ "count": count })))
}

async fn sidebar<R: EventRepository>(State(state): State<AppState<R>>) -> Result<Json<Value>, ApiError> {
    let store = state.lock()?;
    Ok(Json(json!(store.sidebar())))
}

async fn get_draft<R: EventRepository>(State(state): State<AppState<R>>) -> Result<Json<Value>, ApiError> {
    let store = state.lock()?;
    draft_view(&store).map(Json)
}

async fn new_draft<R: EventRepository>(State(state): State<AppState<R>>, Json(body): Json<RangeBody>) -> Result<Json<Value>, ApiError> {
    let range = body.into_range()?;
    let mut store = state.lock()?;
    store.begin_create(range);
    draft_view(&store).map(Json)
}

async fn edit_draft<R: EventRepository>(State(state): State<AppState<R>>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let mut store = state.lock()?;
    store.begin_edit(&EventId(id)).map_err(|e| state.refuse(e))?;
    draft_view(&store).map(Json)
}

async fn patch_draft<R: EventRepository>(State(state): State<AppState<R>>, Json(patch): Json<DraftPatch>) -> Result<Json<Value>, ApiError> {
    let changes = patch.into_changes()?;
    let mut store = state.lock()?;
    for change in changes {
        store.update_draft_field(change).map_err(|e| state.refuse(e))?;
    }
    draft_view(&store).map(Json)
}

async fn save_draft<R: EventRepository>(State(state): State<AppState<R>>, Json(patch): Json<DraftPatch>) -> Result<Json<Value>, ApiError> {
    let changes = patch.into_changes()?;
    let mut store = state.lock()?;
    let outcome = store.submit(changes).map_err(|e| state.refuse(e))?;
    let event = store.event(outcome.id()).map(CalendarEvent::from);
    Ok(Json(json!({ "outcome": outcome.kind(), "id": outcome.id(), "event": event })))
}

async fn cancel_draft<R: EventRepository>(State(state): State<AppState<R>>) -> Result<StatusCode, ApiError> {
    state.lock()?.cancel();
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_draft<R: EventRepository>(State(state): State<AppState<R>>) -> Result<Json<Value>, ApiError> {
    let removed = state.lock()?.delete();
    Ok(Json(json!({ "deleted": removed.map(|e| e.id) })))
}

fn draft_view<R: EventRepository>(store: &EventStore<R>) -> Result<Value, ApiError> {
    let draft = store.draft().ok_or(StoreError::NoDraft)?;
    Ok(json!({
        "mode": store.mode(),
        "draft": draft,
        "isLocked": draft.locked(),
        "fieldErrors": store.field_errors(),
    }))
}
