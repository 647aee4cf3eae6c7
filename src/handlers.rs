use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::Uri,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::dispatch::dispatch;
use crate::errors::WikiError;
use crate::routing::{route_for, Action};
use crate::strategies::found;
use crate::types::AppState;
use crate::utils::{escape_attr, escape_html};

/// Form posted by the edit page
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// `GET /view/{title}`
pub async fn handle_view(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    log::info!("View request received: '{}'", uri.path());
    let title = route_for(Action::View, uri.path())?;
    Ok(dispatch(&state, Action::View, title, None))
}

/// `GET /edit/{title}`
pub async fn handle_edit(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    log::info!("Edit request received: '{}'", uri.path());
    let title = route_for(Action::Edit, uri.path())?;
    Ok(dispatch(&state, Action::Edit, title, None))
}

/// `POST /save/{title}` with an urlencoded `body` field
pub async fn handle_save(
    State(state): State<AppState>,
    uri: Uri,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Result<Response, WikiError> {
    log::info!("Save request received: '{}'", uri.path());
    // the path decides 404 before the form is looked at
    let title = route_for(Action::Save, uri.path())?;
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            log::warn!("Rejected save form for '{}': {}", title, rejection);
            return Ok(rejection.into_response());
        }
    };
    Ok(dispatch(&state, Action::Save, title, Some(form.body.into_bytes())))
}

/// `GET /` sends readers to the front page
pub async fn handle_root(State(state): State<AppState>) -> Response {
    log::debug!("Root request, redirecting to '{}'", state.front_page);
    found(&Action::View.path_for(&state.front_page))
}

/// `GET /pages` lists every stored page
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, WikiError> {
    let titles = state.store.list_titles()?;
    log::info!("Serving page index, {} pages", titles.len());

    let mut html = String::from(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>All pages</title></head><body>",
    );
    html.push_str("<h1>All pages</h1>\n<ul class=\"listing\">\n");
    for title in &titles {
        let href = Action::View.path_for(title);
        html.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            escape_attr(&href),
            escape_html(title.as_str())
        ));
    }
    html.push_str("</ul>\n</body></html>");
    Ok(Html(html))
}

/// Everything that is not a page route
pub async fn handle_not_found(uri: Uri) -> WikiError {
    log::warn!("Path not found: '{}'", uri.path());
    WikiError::InvalidPath
}
