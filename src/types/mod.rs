use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::components::Templates;
use crate::errors::WikiError;
use crate::services::PageStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub templates: Arc<Templates>,
    pub front_page: Title,
}

/// A page title: non-empty ASCII letters and digits only.
///
/// Titles double as file names, so every page lookup goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(WikiError::InvalidPath)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Title {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page as loaded from or written to the page store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }

    /// Page carrying only a title, used for the editor of a missing page
    pub fn blank(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }

    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric_titles() {
        for raw in ["Foo", "FrontPage", "page42", "X"] {
            assert_eq!(Title::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "..", "../etc/passwd", "Foo.txt", "a b", "a/b", "Ünï", "foo%2F", "-x"] {
            assert!(matches!(Title::parse(raw), Err(WikiError::InvalidPath)), "{raw}");
        }
    }

    #[test]
    fn blank_page_keeps_title() {
        let page = Page::blank("Missing".parse().unwrap());
        assert_eq!(page.title.as_str(), "Missing");
        assert!(page.body.is_empty());
    }
}
