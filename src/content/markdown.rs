//! Markdown rendering with heading anchors and table of contents

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Headings that receive the generated table of contents
    static ref TOC_HEADING: Regex =
        Regex::new(r"(?i)^((table[ -]of[ -])?contents?|toc)$").unwrap();
    /// GFM literal autolinks: `http(s)://`, `www.` and email addresses
    static ref AUTOLINK: Regex = Regex::new(
        r"(?i:https?://|www\.)[^\s<]+|[A-Za-z0-9._+-]+@[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)+"
    )
    .unwrap();
    static ref TRAILING_ENTITY: Regex = Regex::new(r"&[A-Za-z0-9]+;$").unwrap();
    static ref HTML_LINK_OPEN: Regex = Regex::new(r"(?i)^<a[\s>]").unwrap();
    static ref HTML_LINK_CLOSE: Regex = Regex::new(r"(?i)^</a\s*>").unwrap();
}

/// A heading found while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
struct Heading {
    level: usize,
    id: String,
    text: String,
    /// Index of the closing heading event
    end: usize,
}

/// Markdown renderer with GFM extensions and a generated table of contents
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    auto_toc: bool,
    toc_max_depth: usize,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            auto_toc: true,
            toc_max_depth: 6,
        }
    }

    /// Create with custom settings
    ///
    /// With `auto_toc` off, a table of contents is only inserted under an
    /// explicit "Contents" heading.
    pub fn with_options(auto_toc: bool, toc_max_depth: usize) -> Self {
        Self {
            auto_toc,
            toc_max_depth: toc_max_depth.clamp(1, 6),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // YAML metadata blocks are stripped beforehand by FrontMatter::parse()
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = TextMergeStream::new(Parser::new_ext(markdown, options));

        let mut events = autolink(parser);
        let headings = anchor_headings(&mut events);

        if let Some((at, entries)) = self.toc_placement(&headings) {
            events.insert(at, Event::Html(CowStr::from(toc_html(&entries))));
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Where to insert the table of contents, and which headings it lists
    fn toc_placement<'h>(&self, headings: &'h [Heading]) -> Option<(usize, Vec<&'h Heading>)> {
        let within_depth = |h: &&Heading| h.level <= self.toc_max_depth;

        if let Some(pos) = headings
            .iter()
            .position(|h| TOC_HEADING.is_match(h.text.trim()))
        {
            let entries: Vec<_> = headings[pos + 1..].iter().filter(within_depth).collect();
            return (!entries.is_empty()).then(|| (headings[pos].end + 1, entries));
        }

        if !self.auto_toc {
            return None;
        }
        let entries: Vec<_> = headings.iter().filter(within_depth).collect();
        (!entries.is_empty()).then_some((0, entries))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn literal URLs, `www.` hosts and email addresses in text into links,
/// leaving code, Markdown links and raw `<a>` elements alone
fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut suppressed = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                suppressed += 1
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                suppressed = suppressed.saturating_sub(1)
            }
            Event::InlineHtml(html) | Event::Html(html) => {
                if HTML_LINK_OPEN.is_match(html) {
                    suppressed += 1
                } else if HTML_LINK_CLOSE.is_match(html) {
                    suppressed = suppressed.saturating_sub(1)
                }
            }
            _ => {}
        }

        match event {
            Event::Text(text) if suppressed == 0 && AUTOLINK.is_match(&text) => {
                push_linked_text(&mut out, &text);
            }
            other => out.push(other),
        }
    }

    out
}

/// A link recognised inside a text run
struct Autolink {
    start: usize,
    end: usize,
    link_type: LinkType,
    dest: String,
}

fn find_autolinks(text: &str) -> Vec<Autolink> {
    let mut found = Vec::new();

    for m in AUTOLINK.find_iter(text) {
        let candidate = m.as_str();
        let lower = candidate.to_ascii_lowercase();
        let www = lower.starts_with("www.");
        let prefix_len = if www {
            4
        } else if let Some(i) = lower.find("://").filter(|_| lower.starts_with("http")) {
            i + 3
        } else {
            // Email: the domain may not end in `-` or `_`
            if !candidate.ends_with(['-', '_']) {
                found.push(Autolink {
                    start: m.start(),
                    end: m.end(),
                    link_type: LinkType::Email,
                    dest: candidate.to_string(),
                });
            }
            continue;
        };

        // Only at the start of a line, after whitespace, or after `*_~(`
        let boundary = text[..m.start()]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || matches!(c, '*' | '_' | '~' | '('));
        let link = trim_link_end(candidate);
        if !boundary || link.len() <= prefix_len {
            continue;
        }

        let dest = if www {
            format!("http://{}", link)
        } else {
            link.to_string()
        };
        found.push(Autolink {
            start: m.start(),
            end: m.start() + link.len(),
            link_type: LinkType::Autolink,
            dest,
        });
    }

    found
}

/// Drop trailing punctuation, unbalanced `)` and a trailing entity reference
fn trim_link_end(link: &str) -> &str {
    let mut link = link;
    loop {
        if let Some(rest) = link.strip_suffix(['?', '!', '.', ',', ':', '*', '_', '~']) {
            link = rest;
        } else if link.ends_with(')') && link.matches(')').count() > link.matches('(').count()
        {
            link = &link[..link.len() - 1];
        } else if let Some(m) = TRAILING_ENTITY.find(link) {
            link = &link[..m.start()];
        } else {
            return link;
        }
    }
}

fn push_linked_text<'a>(out: &mut Vec<Event<'a>>, text: &str) {
    let mut last = 0;
    for link in find_autolinks(text) {
        if link.start > last {
            out.push(Event::Text(CowStr::from(text[last..link.start].to_string())));
        }
        out.push(Event::Start(Tag::Link {
            link_type: link.link_type,
            dest_url: CowStr::from(link.dest),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(CowStr::from(text[link.start..link.end].to_string())));
        out.push(Event::End(TagEnd::Link));
        last = link.end;
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

/// Give every heading a unique slug `id` and collect them in document order
fn anchor_headings(events: &mut [Event<'_>]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut i = 0;

    while i < events.len() {
        let Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) = &events[i]
        else {
            i += 1;
            continue;
        };
        let (level, explicit_id, classes, attrs) =
            (*level, id.clone(), classes.clone(), attrs.clone());

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }

        let base = match explicit_id {
            Some(id) => id.to_string(),
            None => {
                let slug = slug::slugify(&text);
                if slug.is_empty() {
                    "section".to_string()
                } else {
                    slug
                }
            }
        };
        let count = seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;

        events[i] = Event::Start(Tag::Heading {
            level,
            id: Some(CowStr::from(id.clone())),
            classes,
            attrs,
        });
        headings.push(Heading {
            level: level as usize,
            id,
            text,
            end,
        });
        i = end + 1;
    }

    headings
}

/// Nested list of links to the given headings
fn toc_html(entries: &[&Heading]) -> String {
    let base = entries.iter().map(|h| h.level).min().unwrap_or(1);
    let mut html = String::from(r#"<nav class="toc">"#);
    let mut depth = 0;

    for heading in entries {
        let target = (heading.level - base + 1).min(depth + 1);
        if target > depth {
            while depth < target {
                html.push_str("<ul>");
                depth += 1;
            }
        } else {
            html.push_str("</li>");
            while depth > target {
                html.push_str("</ul></li>");
                depth -= 1;
            }
        }
        html.push_str(&format!(
            r##"<li><a href="#{}">{}</a>"##,
            heading.id,
            html_escape(&heading.text)
        ));
    }

    if depth > 0 {
        html.push_str("</li>");
    }
    while depth > 0 {
        html.push_str("</ul>");
        depth -= 1;
        if depth > 0 {
            html.push_str("</li>");
        }
    }

    html.push_str("</nav>\n");
    html
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
