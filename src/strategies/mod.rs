//! What each action does when loading or saving a page fails.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use log::debug;

use crate::errors::WikiError;
use crate::routing::Action;
use crate::types::{Page, Title};

/// Outcome of a strategy decision
pub enum Flow {
    /// Render the action's template with this page
    Continue(Page),
    /// The strategy produced the final response
    Stop(Response),
}

/// Decide how a request continues after its page was loaded or saved
pub trait ErrorStrategy {
    fn handle(&self, outcome: Result<Page, WikiError>, title: &Title) -> Flow;
}

/// Missing page: send the reader to the editor
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewStrategy;

/// Missing page: edit a blank one
#[derive(Debug, Clone, Copy, Default)]
pub struct EditStrategy;

/// Saved: redirect to the page. Failed: 500 with the error text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveStrategy;

impl ErrorStrategy for ViewStrategy {
    fn handle(&self, outcome: Result<Page, WikiError>, title: &Title) -> Flow {
        match outcome {
            Ok(page) => Flow::Continue(page),
            Err(e) => {
                debug!("view '{}' failed ({}), redirecting to editor", title, e);
                Flow::Stop(found(&Action::Edit.path_for(title)))
            }
        }
    }
}

impl ErrorStrategy for EditStrategy {
    fn handle(&self, outcome: Result<Page, WikiError>, title: &Title) -> Flow {
        match outcome {
            Ok(page) => Flow::Continue(page),
            Err(e) => {
                debug!("edit '{}' starts blank ({})", title, e);
                Flow::Continue(Page::blank(title.clone()))
            }
        }
    }
}

impl ErrorStrategy for SaveStrategy {
    fn handle(&self, outcome: Result<Page, WikiError>, title: &Title) -> Flow {
        match outcome {
            Ok(_) => Flow::Stop(found(&Action::View.path_for(title))),
            Err(e) => {
                log::warn!("save '{}' failed: {}", title, e);
                Flow::Stop(e.into_response())
            }
        }
    }
}

/// The strategy registered for each action
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    View(ViewStrategy),
    Edit(EditStrategy),
    Save(SaveStrategy),
}

impl Strategy {
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::View => Strategy::View(ViewStrategy),
            Action::Edit => Strategy::Edit(EditStrategy),
            Action::Save => Strategy::Save(SaveStrategy),
        }
    }
}

impl ErrorStrategy for Strategy {
    fn handle(&self, outcome: Result<Page, WikiError>, title: &Title) -> Flow {
        match self {
            Strategy::View(s) => s.handle(outcome, title),
            Strategy::Edit(s) => s.handle(outcome, title),
            Strategy::Save(s) => s.handle(outcome, title),
        }
    }
}

/// 302 Found to `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn title() -> Title {
        Title::parse("Foo").unwrap()
    }

    fn missing() -> Result<Page, WikiError> {
        Err(WikiError::PageNotFound("Foo".into()))
    }

    fn location(resp: &Response) -> &str {
        resp.headers()[header::LOCATION].to_str().unwrap()
    }

    #[test]
    fn view_redirects_missing_page_to_edit() {
        match Strategy::for_action(Action::View).handle(missing(), &title()) {
            Flow::Stop(resp) => {
                assert_eq!(resp.status(), StatusCode::FOUND);
                assert_eq!(location(&resp), "/edit/Foo");
            }
            Flow::Continue(_) => panic!("view of a missing page must stop"),
        }
    }

    #[test]
    fn view_and_edit_continue_with_loaded_page() {
        for action in [Action::View, Action::Edit] {
            let page = Page::new(title(), "Hello");
            match Strategy::for_action(action).handle(Ok(page.clone()), &title()) {
                Flow::Continue(p) => assert_eq!(p, page),
                Flow::Stop(_) => panic!("{action} stopped on a loaded page"),
            }
        }
    }

    #[test]
    fn edit_replaces_missing_page_with_blank() {
        match Strategy::for_action(Action::Edit).handle(missing(), &title()) {
            Flow::Continue(p) => assert_eq!(p, Page::blank(title())),
            Flow::Stop(_) => panic!("edit must continue"),
        }
    }

    #[test]
    fn save_redirects_to_view_or_fails() {
        match SaveStrategy.handle(Ok(Page::new(title(), "x")), &title()) {
            Flow::Stop(resp) => {
                assert_eq!(resp.status(), StatusCode::FOUND);
                assert_eq!(location(&resp), "/view/Foo");
            }
            Flow::Continue(_) => panic!("save always stops"),
        }

        let failed = Err(WikiError::Persistence(io::Error::new(io::ErrorKind::Other, "disk full")));
        match SaveStrategy.handle(failed, &title()) {
            Flow::Stop(resp) => assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR),
            Flow::Continue(_) => panic!("save always stops"),
        }
    }
}
