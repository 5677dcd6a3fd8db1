//! Built-in page templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use crate::error::Result;

/// Template renderer with the embedded default theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text fields are escaped explicitly in the templates; URLs are
        // already percent-encoded and post bodies are trusted HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("default/layout.html")),
            ("index.html", include_str!("default/index.html")),
            ("category.html", include_str!("default/category.html")),
            ("post.html", include_str!("default/post.html")),
            ("not_found.html", include_str!("default/not_found.html")),
            (
                "partials/post_list.html",
                include_str!("default/partials/post_list.html"),
            ),
        ])?;

        tera.register_filter("capitalize_first", capitalize_first);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Upper-case the first character and keep the rest as written
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Tera filter for [`capitalize`]. The built-in `capitalize` lower-cases the
/// remaining characters.
fn capitalize_first(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("capitalize_first", "value", String, value);
    Ok(Value::String(capitalize(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub root: String,
    pub categories: Vec<CategoryLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
}

/// A post in a listing
#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub category_url: String,
    pub authors: Vec<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedLink {
    pub title: String,
    pub url: String,
}
