use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Link schemes that run code in the reader's browser
const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Service for turning page bodies into HTML for the view template
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownService;

impl MarkdownService {
    /// Create a new markdown service
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options
    }

    /// Render Markdown to HTML.
    ///
    /// Page bodies come from anyone who can post to `/save`, so raw HTML in
    /// the source is emitted as escaped text and script-bearing link targets
    /// are replaced with `#`.
    pub fn render(&self, content: &str) -> String {
        let events = Parser::new_ext(content, Self::options()).map(|ev| match ev {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_url(dest_url),
                title,
                id,
            }),
            other => other,
        });

        let mut out = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if UNSAFE_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        log::warn!("Dropping unsafe link target {:?}", &*url);
        CowStr::Borrowed("#")
    } else {
        url
    }
}
