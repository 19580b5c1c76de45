use axum::extract::{Form, Path};
use axum::response::{Html, Redirect};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::models::Draft;
use crate::state::AppState;
use crate::ui;

#[derive(Deserialize)]
pub struct DraftForm {
    #[serde(default)]
    course: String,
    #[serde(default)]
    description: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/posts", post(submit_post))
        .route("/posts/{id}/edit", post(edit_post))
        .route("/posts/{id}/delete", post(delete_post))
        .route("/notifications/{id}/dismiss", post(dismiss_notification))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let now = Utc::now();
    let mut store = state.store.lock().await;
    store.notifications_mut().prune(now);
    let page = ui::render_page(&store, now)?;
    Ok(Html(page))
}

// The store lock is never held across a remote call, so rendering does not
// wait on the network. API failures are logged by the store and the page
// just reloads.

async fn submit_post(
    State(state): State<AppState>,
    Form(form): Form<DraftForm>,
) -> Redirect {
    let _mutation = state.mutations.lock().await;
    let pending = {
        let mut store = state.store.lock().await;
        store.set_draft(Draft::new(form.course, form.description));
        store.begin_submit()
    };

    let result = pending.send(state.api.as_ref()).await;

    let mut store = state.store.lock().await;
    if let Err(e) = store.finish_submit(pending, result) {
        debug!("submit not applied: {}", e);
    }
    Redirect::to("/")
}

async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let mut store = state.store.lock().await;
    store.request_edit(&id)?;
    Ok(Redirect::to("/"))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let _mutation = state.mutations.lock().await;
    state.store.lock().await.begin_delete(&id)?;

    let result = state.api.delete_post(&id).await;

    let mut store = state.store.lock().await;
    if let Err(e) = store.finish_delete(&id, result) {
        debug!("delete of post {} not applied: {}", id, e);
    }
    Ok(Redirect::to("/"))
}

async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Redirect {
    let mut store = state.store.lock().await;
    store.notifications_mut().dismiss(id);
    Redirect::to("/")
}
