use axum::response::{Html, IntoResponse, Response};
use log::{debug, error, info};

use crate::routing::Action;
use crate::strategies::{ErrorStrategy, Flow, Strategy};
use crate::types::{AppState, Page, Title};

/// Run one page action.
///
/// View and edit load the page; save persists `submitted` (empty when
/// absent). The action's strategy then either stops with its own response
/// or hands back the page to render with `<action>.html`.
pub fn dispatch(
    state: &AppState,
    action: Action,
    title: Title,
    submitted: Option<Vec<u8>>,
) -> Response {
    let outcome = match action {
        Action::View | Action::Edit => state.store.load(&title),
        Action::Save => {
            let page = Page::new(title.clone(), submitted.unwrap_or_default());
            state.store.save(&page).map(|()| page)
        }
    };

    let page = match Strategy::for_action(action).handle(outcome, &title) {
        Flow::Stop(response) => {
            debug!("{} '{}' stopped with {}", action, title, response.status());
            return response;
        }
        Flow::Continue(page) => page,
    };

    let modified = state.store.last_modified(&page.title);
    match state.templates.render(&action.template_name(), &page, modified) {
        Ok(html) => {
            info!("Rendered {} for '{}'", action, title);
            Html(html).into_response()
        }
        Err(e) => {
            error!("Rendering {} for '{}' failed: {}", action, title, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use axum::http::{header, StatusCode};
    use tempfile::TempDir;
    use crate::components::Templates;
    use crate::services::PageStore;

    fn state(dir: &TempDir) -> AppState {
        AppState {
            store: Arc::new(PageStore::new(dir.path().to_path_buf())),
            templates: Arc::new(Templates::builtin()),
            front_page: Title::parse("FrontPage").unwrap(),
        }
    }

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    #[test]
    fn save_writes_and_redirects() {
        let dir = TempDir::new().unwrap();
        let resp = dispatch(&state(&dir), Action::Save, title("Foo"), Some(b"Hello".to_vec()));

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers()[header::LOCATION], "/view/Foo");
        assert_eq!(std::fs::read(dir.path().join("Foo.txt")).unwrap(), b"Hello");
    }

    #[test]
    fn save_without_body_stores_empty_page() {
        let dir = TempDir::new().unwrap();
        let resp = dispatch(&state(&dir), Action::Save, title("Foo"), None);

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(std::fs::read(dir.path().join("Foo.txt")).unwrap().is_empty());
    }

    #[test]
    fn view_missing_redirects_and_edit_missing_renders() {
        let dir = TempDir::new().unwrap();
        let st = state(&dir);

        let view = dispatch(&st, Action::View, title("Nope"), None);
        assert_eq!(view.status(), StatusCode::FOUND);
        assert_eq!(view.headers()[header::LOCATION], "/edit/Nope");

        let edit = dispatch(&st, Action::Edit, title("Nope"), None);
        assert_eq!(edit.status(), StatusCode::OK);
        assert!(!dir.path().join("Nope.txt").exists());
    }

    #[test]
    fn missing_template_is_server_error() {
        let dir = TempDir::new().unwrap();
        let mut st = state(&dir);
        st.store.save(&Page::new(title("Foo"), "x")).unwrap();
        st.templates = Arc::new(Templates::new().with_template("edit.html", "{{TITLE}}"));

        assert_eq!(dispatch(&st, Action::Edit, title("Foo"), None).status(), StatusCode::OK);
        assert_eq!(
            dispatch(&st, Action::View, title("Foo"), None).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
