//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Site-relative path of a category listing
pub fn category_path(category: &str) -> String {
    format!("blogs/{}/", encode_segment(category))
}

/// Site-relative path of a post page
pub fn post_path(category: &str, slug: &str) -> String {
    format!(
        "blogs/{}/{}/",
        encode_segment(category),
        encode_segment(slug)
    )
}

/// Link to the Markdown source of a post, if an edit base URL is configured
pub fn edit_url(config: &SiteConfig, category: &str, slug: &str) -> Option<String> {
    config.edit_url.as_ref().map(|base| {
        format!(
            "{}/{}/{}.md",
            base.trim_end_matches('/'),
            encode_segment(category),
            encode_segment(slug)
        )
    })
}
