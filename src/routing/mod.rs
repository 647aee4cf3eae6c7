//! Request path validation.
//!
//! Every page request must look like `/(view|edit|save)/<title>` where the
//! title is ASCII letters and digits. Anything else is answered with 404
//! before the page store is touched.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::WikiError;
use crate::types::Title;

static VALID_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(view|edit|save)/([a-zA-Z0-9]+)$").unwrap());

/// The three page actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Save => "save",
        }
    }

    /// Template rendered when this action succeeds
    pub fn template_name(self) -> String {
        format!("{}.html", self.as_str())
    }

    /// URL of this action for `title`
    pub fn path_for(self, title: &Title) -> String {
        format!("/{}/{}", self.as_str(), title)
    }
}

impl FromStr for Action {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Action::View),
            "edit" => Ok(Action::Edit),
            "save" => Ok(Action::Save),
            _ => Err(WikiError::InvalidPath),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    pub title: Title,
}

/// Match `path` against `/(view|edit|save)/<title>`
pub fn match_route(path: &str) -> Option<Route> {
    let caps = VALID_PATH.captures(path)?;
    let action = caps.get(1)?.as_str().parse().ok()?;
    let title = Title::parse(caps.get(2)?.as_str()).ok()?;
    Some(Route { action, title })
}

/// Title from `path`, which must be a request for `action`
pub fn route_for(action: Action, path: &str) -> Result<Title, WikiError> {
    match match_route(path) {
        Some(route) if route.action == action => Ok(route.title),
        _ => {
            log::debug!("Rejecting path {:?} for action {}", path, action);
            Err(WikiError::InvalidPath)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_action() {
        let cases = [
            ("/view/Foo", Action::View),
            ("/edit/Bar2", Action::Edit),
            ("/save/x", Action::Save),
        ];
        for (path, action) in cases {
            let route = match_route(path).unwrap();
            assert_eq!(route.action, action);
            assert_eq!(route.action.path_for(&route.title), path);
        }
    }

    #[test]
    fn rejects_bad_paths() {
        for path in [
            "/",
            "/view/",
            "/view",
            "/delete/Foo",
            "/view/Foo/",
            "/view/Foo/bar",
            "/view/../secret",
            "/view/..%2Fsecret",
            "/view/Foo.txt",
            "/view/a-b",
            "view/Foo",
            "/VIEW/Foo",
            "/view/Foo\n",
        ] {
            assert!(match_route(path).is_none(), "{path:?}");
        }
    }

    #[test]
    fn route_for_checks_action() {
        assert_eq!(route_for(Action::Edit, "/edit/Foo").unwrap().as_str(), "Foo");
        assert!(matches!(route_for(Action::View, "/edit/Foo"), Err(WikiError::InvalidPath)));
    }

    #[test]
    fn template_names_follow_action() {
        assert_eq!(Action::View.template_name(), "view.html");
        assert_eq!(Action::Edit.template_name(), "edit.html");
        assert_eq!("save".parse::<Action>().unwrap(), Action::Save);
        assert!("remove".parse::<Action>().is_err());
    }
}
