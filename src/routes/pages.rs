//! Server-rendered page: topic form, tutorial sidebar, selected tutorial.
//!
//! The page is rebuilt from the store on every request. While a generation
//! is in flight the form is disabled and the page refreshes itself, so the
//! settled record shows up without client-side scripting.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::render::render_markdown_html;
use crate::services::tutorial;
use crate::state::{AppState, Tutorial, TutorialStatus, TutorialStore};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const REFRESH_SECS: u32 = 2;

#[derive(Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub topic: String,
}

#[derive(Serialize)]
struct EntryView<'a> {
    id: Uuid,
    topic: &'a str,
    timestamp: &'a str,
    status: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct SelectedView<'a> {
    topic: &'a str,
    timestamp: &'a str,
    status: &'static str,
    html: Option<String>,
    error: Option<&'a str>,
}

fn status_name(status: &TutorialStatus) -> &'static str {
    match status {
        TutorialStatus::Pending => "pending",
        TutorialStatus::Ready { .. } => "ready",
        TutorialStatus::Failed { .. } => "failed",
    }
}

fn selected_view(t: &Tutorial) -> SelectedView<'_> {
    SelectedView {
        topic: &t.topic,
        timestamp: &t.timestamp,
        status: status_name(&t.status),
        html: t.content().map(render_markdown_html),
        error: t.error(),
    }
}

/// Render the page for the current store contents.
pub(crate) fn render_index(store: &TutorialStore) -> Result<String, minijinja::Error> {
    let selected_id = store.selected_id();
    let tutorials: Vec<EntryView<'_>> = store
        .tutorials()
        .iter()
        .map(|t| EntryView {
            id: t.id,
            topic: &t.topic,
            timestamp: &t.timestamp,
            status: status_name(&t.status),
            selected: Some(t.id) == selected_id,
        })
        .collect();

    // The in-flight topic, unless the main pane already shows it.
    let generating = store
        .tutorials()
        .iter()
        .find(|t| t.is_loading() && Some(t.id) != selected_id)
        .map(|t| t.topic.as_str());

    let env = Environment::new();
    let template = env.template_from_named_str("index.html", INDEX_TEMPLATE)?;
    template.render(context! {
        tutorials => tutorials,
        selected => store.selected().map(selected_view),
        generating => generating,
        busy => store.is_busy(),
        refresh_secs => REFRESH_SECS,
    })
}

/// `GET /`: the whole application page.
pub async fn index(State(state): State<AppState>) -> Response {
    let store = state.tutorials.read().await;
    match render_index(&store) {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!(error = %e, "pages: template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /tutorials`: submit a topic from the form.
///
/// Blank and in-flight submissions are ignored; the page is shown again
/// either way.
pub async fn submit_topic(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Redirect {
    if let Err(e) = tutorial::submit(&state, &form.topic).await {
        debug!(reason = %e, "pages: submission ignored");
    }
    Redirect::to("/")
}

/// `POST /tutorials/{id}/select`: show a past tutorial in the main pane.
pub async fn select_tutorial(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Redirect, StatusCode> {
    let mut store = state.tutorials.write().await;
    if store.select(id) { Ok(Redirect::to("/")) } else { Err(StatusCode::NOT_FOUND) }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
