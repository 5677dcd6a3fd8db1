//! Post models handed to the page layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a post: category name plus slug
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId {
    pub category: String,
    pub slug: String,
}

impl PostId {
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.slug)
    }
}

/// A related post link, resolved within the same category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedPost {
    pub title: String,
    pub slug: String,
}

/// A fully resolved post, built per request
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub category: String,
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
    pub content_html: String,
    pub authors: Vec<String>,
    pub relates: Vec<RelatedPost>,
}

/// Listing view of a published post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub slug: String,
    /// Category name
    pub tag: String,
    pub authors: Vec<String>,
    pub date: Option<String>,
}

/// Page-level metadata used for `<title>` and SEO tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    /// Catalog tags joined with `,`
    pub keywords: String,
    pub description: String,
}
