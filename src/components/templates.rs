use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use log::{debug, info, warn};
use time::OffsetDateTime;
use crate::errors::WikiError;
use crate::services::MarkdownService;
use crate::types::Page;
use crate::utils::{escape_html, last_modified_html};

/// Templates read at startup, one per renderable action
const TEMPLATE_NAMES: [&str; 2] = ["edit.html", "view.html"];

const DEFAULT_VIEW: &str = "<!doctype html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>{{TITLE}}</title></head>
<body>
<h1>{{TITLE}}</h1>
<p>[<a href=\"/edit/{{TITLE}}\">edit</a>] [<a href=\"/pages\">all pages</a>]</p>
{{MODIFIED}}
<div>{{CONTENT}}</div>
</body>
</html>
";

const DEFAULT_EDIT: &str = "<!doctype html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>Editing {{TITLE}}</title></head>
<body>
<h1>Editing {{TITLE}}</h1>
<form action=\"/save/{{TITLE}}\" method=\"POST\">
<div><textarea name=\"body\" rows=\"20\" cols=\"80\">{{BODY}}</textarea></div>
<div><input type=\"submit\" value=\"Save\"></div>
</form>
</body>
</html>
";

/// Immutable template set, built once and shared by every request
#[derive(Debug, Clone)]
pub struct Templates {
    templates: HashMap<String, String>,
    markdown: MarkdownService,
}

impl Templates {
    /// Empty template set
    pub fn new() -> Self {
        Self { templates: HashMap::new(), markdown: MarkdownService::new() }
    }

    /// Built-in templates only
    pub fn builtin() -> Self {
        let templates = TEMPLATE_NAMES
            .iter()
            .map(|name| (name.to_string(), builtin_source(name).to_string()))
            .collect();
        Self { templates, markdown: MarkdownService::new() }
    }

    /// Load `edit.html` and `view.html` from `dir`.
    ///
    /// A missing file falls back to the built-in template; any other read
    /// failure is returned.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut templates = HashMap::new();
        for name in TEMPLATE_NAMES {
            let path = dir.join(name);
            let source = match fs::read_to_string(&path) {
                Ok(source) => {
                    info!("Loaded template {:?}", path);
                    source
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!("Template {:?} not found, using built-in {}", path, name);
                    builtin_source(name).to_string()
                }
                Err(e) => {
                    return Err(WikiError::TemplateError(format!(
                        "reading {}: {}",
                        path.display(),
                        e
                    )));
                }
            };
            templates.insert(name.to_string(), source);
        }
        Ok(Self { templates, markdown: MarkdownService::new() })
    }

    /// Use `source` for template `name`
    pub fn with_template(mut self, name: &str, source: impl Into<String>) -> Self {
        self.templates.insert(name.to_string(), source.into());
        self
    }

    /// Render template `name` with the page's data
    pub fn render(
        &self,
        name: &str,
        page: &Page,
        modified: Option<OffsetDateTime>,
    ) -> Result<String, WikiError> {
        let source = self.templates.get(name).ok_or_else(|| {
            WikiError::TemplateError(format!("no template named {:?}", name))
        })?;
        debug!("Rendering template {} for page '{}'", name, page.title);

        let body = page.body_text();
        let mut html = String::with_capacity(source.len() + body.len() * 2);
        let mut rest = source.as_str();
        // single pass, so placeholder text inside a page body stays literal
        while let Some(start) = rest.find("{{") {
            html.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                rest = &rest[start..];
                break;
            };
            match &after[..end] {
                "TITLE" => html.push_str(&escape_html(page.title.as_str())),
                "BODY" => html.push_str(&escape_html(&body)),
                "CONTENT" => html.push_str(&self.markdown.render(&body)),
                "MODIFIED" => html.push_str(&last_modified_html(modified)),
                other => {
                    html.push_str("{{");
                    html.push_str(other);
                    html.push_str("}}");
                }
            }
            rest = &after[end + 2..];
        }
        html.push_str(rest);
        Ok(html)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_source(name: &str) -> &'static str {
    match name {
        "view.html" => DEFAULT_VIEW,
        _ => DEFAULT_EDIT,
    }
}
