//! HTML form server exposing the same page operations as the CLI.

pub mod render;

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::Transport;
use crate::config::Settings;
use crate::error::NotesError;
use crate::pages::PageService;

/// Version message attached to updates made through the browser.
pub const WEB_UPDATE_MESSAGE: &str = "Updated via Web App";

/// State shared by every handler. Both halves are immutable.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>, settings: Arc<Settings>) -> Self {
        AppState {
            transport,
            settings,
        }
    }

    fn pages(&self) -> PageService<'_, dyn Transport> {
        PageService::new(self.transport.as_ref(), &self.settings)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteForm {
    pub id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_list))
        .route("/create", get(handle_create_form).post(handle_create))
        .route("/read", get(handle_read))
        .route("/edit", get(handle_edit_form).post(handle_edit))
        .route("/delete", post(handle_delete))
        .with_state(state)
}

/// Serve the form UI on `addr` until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> Result<(), NotesError> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(%local, "form server listening");
    println!("Server starting on http://{}", local);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn require_id(id: &str) -> Result<&str, NotesError> {
    if id.is_empty() {
        return Err(NotesError::validation("ID required"));
    }
    Ok(id)
}

fn require_note(form: &NoteForm) -> Result<(), NotesError> {
    if form.title.is_empty() || form.content.is_empty() {
        return Err(NotesError::validation("Title and content are required"));
    }
    Ok(())
}

pub async fn handle_list(State(state): State<AppState>) -> Result<impl IntoResponse, NotesError> {
    let pages = state.pages().fetch_all().await?;
    tracing::debug!(count = pages.len(), "rendering notes list");
    Ok(Html(render::list_page(&pages)))
}

pub async fn handle_create_form() -> Html<String> {
    Html(render::create_form())
}

pub async fn handle_create(
    State(state): State<AppState>,
    Form(form): Form<NoteForm>,
) -> Result<impl IntoResponse, NotesError> {
    require_note(&form)?;
    state.pages().create(&form.title, &form.content).await?;
    Ok(Redirect::to("/"))
}

pub async fn handle_read(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, NotesError> {
    let id = require_id(&query.id)?;
    let page = state.pages().get(id, true).await?;
    Ok(Html(render::read_page(&page)))
}

pub async fn handle_edit_form(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, NotesError> {
    let id = require_id(&query.id)?;
    let page = state.pages().get(id, true).await?;
    Ok(Html(render::edit_form(&page)))
}

pub async fn handle_edit(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Form(form): Form<NoteForm>,
) -> Result<impl IntoResponse, NotesError> {
    let id = require_id(&query.id)?;
    require_note(&form)?;
    state
        .pages()
        .update(id, &form.title, &form.content, WEB_UPDATE_MESSAGE)
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn handle_delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<impl IntoResponse, NotesError> {
    let id = require_id(&form.id)?;
    state.pages().delete(id).await?;
    Ok(Redirect::to("/"))
}
